//! Shape checks for the JSON the text service returns.
//!
//! Only the fields of the plan types survive; anything else the model adds
//! is dropped. `sets`/`reps` are coerced to positive integers.

use serde_json::{Map, Value};

use super::GenerationError;
use crate::models::plan::{DietPlan, ExerciseDay, Meal, Routine, WorkoutPlan};
use crate::utils::validation::{parse_leading_int, parse_leading_number};

pub const DEFAULT_SETS: u32 = 1;
pub const DEFAULT_REPS: u32 = 10;

/// Coerces a raw count to a positive integer, falling back to `default`.
pub fn coerce_count(value: Option<&Value>, default: u32) -> u32 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64().map(|f| f.trunc()).and_then(|f| {
            if f >= 1.0 && f <= u32::MAX as f64 {
                Some(f as u32)
            } else {
                None
            }
        }),
        Some(Value::String(s)) => parse_leading_int(s).and_then(|n| u32::try_from(n).ok()),
        _ => None,
    };
    parsed.filter(|n| *n > 0).unwrap_or(default)
}

fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Map<String, Value>, GenerationError> {
    value
        .as_object()
        .ok_or_else(|| GenerationError::Shape(format!("{} is not an object", what)))
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>, GenerationError> {
    obj.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| GenerationError::Shape(format!("missing \"{}\" array", key)))
}

fn text(obj: &Map<String, Value>, key: &str) -> Result<String, GenerationError> {
    match obj.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(GenerationError::Shape(format!("missing \"{}\" text", key))),
    }
}

fn strings(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}

pub fn workout_plan(raw: &Value) -> Result<WorkoutPlan, GenerationError> {
    let root = object(raw, "workout plan")?;

    let mut exercises = Vec::new();
    for entry in array(root, "exercises")? {
        let entry = object(entry, "exercise day")?;
        let mut routines = Vec::new();
        for routine in array(entry, "routines")? {
            let routine = object(routine, "routine")?;
            routines.push(Routine {
                name: text(routine, "name")?,
                sets: coerce_count(routine.get("sets"), DEFAULT_SETS),
                reps: coerce_count(routine.get("reps"), DEFAULT_REPS),
            });
        }
        exercises.push(ExerciseDay { day: text(entry, "day")?, routines });
    }

    let schedule = match root.get("schedule").and_then(Value::as_array) {
        Some(days) => strings(days),
        None => exercises.iter().map(|e| e.day.clone()).collect(),
    };

    Ok(WorkoutPlan { schedule, exercises })
}

pub fn diet_plan(raw: &Value) -> Result<DietPlan, GenerationError> {
    let root = object(raw, "diet plan")?;

    let daily_calories = match root.get("dailyCalories") {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_leading_number(s),
        _ => None,
    }
    .ok_or_else(|| GenerationError::Shape("\"dailyCalories\" is not a number".to_string()))?;

    let mut meals = Vec::new();
    for meal in array(root, "meals")? {
        let meal = object(meal, "meal")?;
        let foods = meal.get("foods").and_then(Value::as_array).map(|f| strings(f)).unwrap_or_default();
        meals.push(Meal { name: text(meal, "name")?, foods });
    }

    Ok(DietPlan { daily_calories, meals })
}
