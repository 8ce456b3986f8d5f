use lazy_static::lazy_static;
use regex::Regex;
use validator::Validate;
use crate::errors::AppError;

lazy_static! {
    static ref LEADING_INT: Regex = Regex::new(r"^\s*([+-]?\d+)").unwrap();
    static ref LEADING_NUMBER: Regex = Regex::new(r"^\s*([+-]?\d+(?:\.\d+)?)").unwrap();
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload.validate()
        .map_err(|err| AppError::BadRequest(err.to_string()))
}

/// Reads the integer a string starts with, ignoring whatever trails it
/// ("12 reps" -> 12). Returns `None` when there is no leading digit run.
pub fn parse_leading_int(text: &str) -> Option<i64> {
    LEADING_INT
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Like [`parse_leading_int`] but keeps a decimal part ("2150.5 kcal" -> 2150.5).
pub fn parse_leading_number(text: &str) -> Option<f64> {
    LEADING_NUMBER
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

/// A value counts as present when it is neither absent nor an empty string.
pub fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}
