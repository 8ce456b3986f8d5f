pub mod dashboard;
pub mod form;

use actix_web::http::header::ContentType;
use actix_web::HttpResponse;
use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"
body { background: #09090b; color: #e4e4e7; font-family: system-ui, sans-serif; margin: 0; }
main { max-width: 960px; margin: 0 auto; padding: 3rem 1rem 8rem; }
.panel { border: 1px solid #27272a; border-radius: 8px; padding: 1.5rem; margin-bottom: 2rem; }
.accent { color: #22d3ee; }
.muted { color: #a1a1aa; font-size: 0.875rem; }
.mono { font-family: ui-monospace, monospace; }
label { display: block; margin-bottom: 0.25rem; font-size: 0.875rem; }
input, select { width: 100%; padding: 0.75rem; margin-bottom: 1rem; background: #27272a; color: #f4f4f5; border: 1px solid #3f3f46; border-radius: 6px; box-sizing: border-box; }
button, .button { display: inline-block; padding: 0.6rem 1rem; border: 1px solid #3f3f46; border-radius: 6px; background: transparent; color: #e4e4e7; text-decoration: none; }
button[type=submit] { width: 100%; background: #0891b2; border: none; font-weight: 600; }
button:disabled { opacity: 0.5; }
.button.selected { border-color: #22d3ee; color: #22d3ee; background: rgba(34, 211, 238, 0.15); }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); gap: 1rem; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 0.5rem 1rem; cursor: pointer; border: 1px solid #27272a; }
.tabs > .tab-content { display: none; padding-top: 1.5rem; }
#tab-workout:checked ~ .workout, #tab-diet:checked ~ .diet { display: block; }
#tab-workout:checked + label, #tab-diet:checked + label { color: #22d3ee; background: rgba(34, 211, 238, 0.15); }
details { border: 1px solid #27272a; border-radius: 8px; margin-bottom: 1rem; }
summary { padding: 0.75rem 1rem; cursor: pointer; display: flex; justify-content: space-between; }
.routine { border: 1px solid #27272a; border-radius: 4px; margin: 0.5rem 1rem; padding: 0.75rem; display: flex; justify-content: space-between; }
.badge { padding: 0.15rem 0.5rem; border-radius: 4px; background: rgba(34, 211, 238, 0.15); font-size: 0.75rem; margin-left: 0.5rem; }
"#;

/// Escapes text for an element body.
pub fn text(value: &str) -> String {
    encode_text(value).into_owned()
}

/// Escapes text for a double-quoted attribute value.
pub fn attr(value: &str) -> String {
    encode_double_quoted_attribute(value).into_owned()
}

pub fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ka\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n{}\n</main>\n</body>\n</html>\n",
        text(title),
        STYLE,
        body
    )
}

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(body)
}
