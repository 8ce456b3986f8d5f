use std::fmt::Write;

use super::{attr, page, text};
use crate::models::form::{FitnessGoal, FitnessLevel, FormInput};

pub const FORM_PATH: &str = "/generate-program";

fn number_input(out: &mut String, name: &str, label: &str, value: &str, bounds: Option<(u32, u32)>) {
    let bounds = bounds
        .map(|(min, max)| format!(" min=\"{}\" max=\"{}\"", min, max))
        .unwrap_or_default();
    let _ = write!(
        out,
        "<label for=\"{name}\">{label}</label>\n\
         <input type=\"number\" id=\"{name}\" name=\"{name}\" value=\"{value}\"{bounds} required>\n",
        name = name,
        label = text(label),
        value = attr(value),
        bounds = bounds,
    );
}

fn select(out: &mut String, name: &str, label: &str, prompt: &str, options: &[(&str, &str)], selected: Option<&str>) {
    let _ = writeln!(out, "<label for=\"{name}\">{}</label>", text(label), name = name);
    let _ = writeln!(out, "<select id=\"{name}\" name=\"{name}\" required>", name = name);
    let _ = writeln!(out, "<option value=\"\">{}</option>", text(prompt));
    for (value, option_label) in options {
        let mark = if selected == Some(*value) { " selected" } else { "" };
        let _ = writeln!(out, "<option value=\"{}\"{}>{}</option>", attr(value), mark, text(option_label));
    }
    out.push_str("</select>\n");
}

fn prefill<'a>(values: Option<&'a FormInput>, f: fn(&FormInput) -> &str) -> &'a str {
    values.map(f).unwrap_or("")
}

/// The plan form, optionally pre-filled with a previous submission.
pub fn render(values: Option<&FormInput>) -> String {
    let goals: Vec<(&str, &str)> = FitnessGoal::ALL.iter().map(|g| (g.as_str(), g.label())).collect();
    let levels: Vec<(&str, &str)> = FitnessLevel::ALL.iter().map(|l| (l.as_str(), l.label())).collect();

    let mut body = String::new();
    body.push_str("<section class=\"panel\">\n");
    body.push_str("<h2 class=\"accent\">შექმენი თქვენი პერსონალური კვების გეგმა</h2>\n");
    let _ = writeln!(
        body,
        "<form method=\"post\" action=\"{}\" onsubmit=\"this.querySelector('button').disabled = true\">",
        FORM_PATH
    );

    number_input(&mut body, "age", "ასაკი:", prefill(values, |v| v.age.as_str()), None);
    number_input(&mut body, "weight", "წონა (kg):", prefill(values, |v| v.weight.as_str()), None);
    number_input(&mut body, "height", "სიმაღლე (cm):", prefill(values, |v| v.height.as_str()), None);
    select(
        &mut body,
        "fitnessGoal",
        "მიზანი:",
        "აირჩიე მიზანი",
        &goals,
        values.map(|v| v.fitness_goal.as_str()),
    );
    number_input(
        &mut body,
        "numberOfDays",
        "აირჩიე სასურველი დღეების რაოდენობა:",
        prefill(values, |v| v.number_of_days.as_str()),
        Some((1, 30)),
    );
    select(
        &mut body,
        "fitnessLevel",
        "დონე:",
        "აირჩიე შენი დონე",
        &levels,
        values.map(|v| v.fitness_level.as_str()),
    );

    body.push_str("<button type=\"submit\">შექმენი პროგრამა</button>\n</form>\n</section>\n");
    page("შექმენი პროგრამა", &body)
}
