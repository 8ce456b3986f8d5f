use std::fmt::Write;

use crate::models::form::FormInput;

/// Language and vocabulary directives appended to every prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptLocale {
    pub directives: Vec<String>,
}

impl PromptLocale {
    pub fn georgian() -> Self {
        PromptLocale {
            directives: vec![
                "Write every text value (day names, exercise names, meal names, foods) in Georgian.".to_string(),
                "If the word 'რბოლა' appears, replace it with 'ძუნძული' or 'სირბილი'.".to_string(),
                "Name meals as: Breakfast-საუზმე, Lunch-სადილი, Snack-სნექი, Dinner-ვახშამი, Post-workout snack-ვარჯიშის შემდგომ.".to_string(),
            ],
        }
    }

    pub fn english() -> Self {
        PromptLocale { directives: Vec::new() }
    }

    fn write_to(&self, out: &mut String) {
        for directive in &self.directives {
            let _ = writeln!(out, "  - {}", directive);
        }
    }
}

const WORKOUT_EXAMPLE: &str = r#"  {
    "schedule": ["Monday", "Wednesday", "Friday"],
    "exercises": [
      {
        "day": "Monday",
        "routines": [
          { "name": "Exercise Name", "sets": 3, "reps": 10 }
        ]
      }
    ]
  }"#;

const DIET_EXAMPLE: &str = r#"  {
    "dailyCalories": 2000,
    "meals": [
      { "name": "Breakfast", "foods": ["Oatmeal with berries", "Greek yogurt", "Black coffee"] },
      { "name": "Lunch", "foods": ["Grilled chicken salad", "Whole grain bread", "Water"] }
    ]
  }"#;

pub fn workout_prompt(input: &FormInput, locale: &PromptLocale) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are an experienced fitness coach creating a personalized workout plan based on:"
    );
    let _ = writeln!(prompt, "  Age: {}", input.age);
    let _ = writeln!(prompt, "  Height: {}", input.height);
    let _ = writeln!(prompt, "  Weight: {}", input.weight);
    let _ = writeln!(prompt, "  Available days for workout: {}", input.number_of_days);
    let _ = writeln!(prompt, "  Fitness goal: {}", input.fitness_goal.as_str());
    let _ = writeln!(prompt, "  Fitness level: {}", input.fitness_level.as_str());
    prompt.push('\n');
    prompt.push_str("  CRITICAL SCHEMA INSTRUCTIONS:\n");
    prompt.push_str("  - ONLY include fields shown in the structure below\n");
    prompt.push_str("  - \"sets\" and \"reps\" MUST be numbers (not strings)\n");
    prompt.push_str("  - For cardio, use numeric reps/sets (e.g., \"sets\": 1, \"reps\": 1)\n");
    locale.write_to(&mut prompt);
    prompt.push_str("  Return ONLY this JSON format:\n");
    prompt.push_str(WORKOUT_EXAMPLE);
    prompt
}

pub fn diet_prompt(input: &FormInput, locale: &PromptLocale) -> String {
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "You are an experienced nutrition coach creating a personalized diet plan based on:"
    );
    let _ = writeln!(prompt, "  Age: {}", input.age);
    let _ = writeln!(prompt, "  Height: {}", input.height);
    let _ = writeln!(prompt, "  Weight: {}", input.weight);
    let _ = writeln!(prompt, "  Fitness goal: {}", input.fitness_goal.as_str());
    prompt.push('\n');
    prompt.push_str("  CRITICAL SCHEMA INSTRUCTIONS:\n");
    prompt.push_str("  - ONLY include the following fields:\n");
    prompt.push_str("  - \"dailyCalories\" (number)\n");
    prompt.push_str("  - \"meals\" (array of meals with \"name\" and \"foods\")\n");
    prompt.push_str("  - DO NOT add any other fields\n");
    locale.write_to(&mut prompt);
    prompt.push_str("  Return ONLY this JSON format:\n");
    prompt.push_str(DIET_EXAMPLE);
    prompt
}
