pub mod gemini;
pub mod prompts;
pub mod validate;

use std::sync::Arc;

use async_trait::async_trait;
use log::{error, info};
use serde_json::Value;
use thiserror::Error;

use crate::models::form::FormInput;
use crate::models::plan::GeneratedPlan;
use prompts::PromptLocale;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text service failed: {0}")]
    Service(String),
    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("response has an unexpected shape: {0}")]
    Shape(String),
}

/// Sampling settings sent with every prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOptions {
    pub model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub response_mime_type: String,
}

impl GenerationOptions {
    /// Low temperature, JSON-only output.
    pub fn json(model: impl Into<String>) -> Self {
        GenerationOptions {
            model: model.into(),
            temperature: 0.4,
            top_p: 0.9,
            response_mime_type: "application/json".to_string(),
        }
    }
}

/// A service that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<String, GenerationError>;
}

/// Produces a workout and diet plan from form input with two prompts.
pub struct PlanGenerator {
    client: Arc<dyn TextGenerator>,
    options: GenerationOptions,
    locale: PromptLocale,
}

impl PlanGenerator {
    pub fn new(client: Arc<dyn TextGenerator>, options: GenerationOptions, locale: PromptLocale) -> Self {
        PlanGenerator { client, options, locale }
    }

    /// Runs the workout phase then the diet phase. Either failing aborts
    /// the whole run; there are no retries.
    pub async fn generate(&self, input: &FormInput) -> Result<GeneratedPlan, GenerationError> {
        info!(
            "Generating plan (goal={}, level={}, days={})",
            input.fitness_goal.as_str(),
            input.fitness_level.as_str(),
            input.number_of_days
        );

        let raw = self.request_json(&prompts::workout_prompt(input, &self.locale)).await?;
        let workout_plan = validate::workout_plan(&raw).map_err(|e| {
            error!("Workout plan rejected: {}", e);
            e
        })?;

        let raw = self.request_json(&prompts::diet_prompt(input, &self.locale)).await?;
        let diet_plan = validate::diet_plan(&raw).map_err(|e| {
            error!("Diet plan rejected: {}", e);
            e
        })?;

        info!(
            "Plan generated: {} workout days, {} meals",
            workout_plan.exercises.len(),
            diet_plan.meals.len()
        );
        Ok(GeneratedPlan { workout_plan, diet_plan })
    }

    async fn request_json(&self, prompt: &str) -> Result<Value, GenerationError> {
        let text = self.client.generate(prompt, &self.options).await?;
        serde_json::from_str(&text).map_err(|e| {
            error!("Text service returned malformed JSON: {}", e);
            GenerationError::Parse(e)
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::models::form::{FitnessGoal, FitnessLevel};

    fn input() -> FormInput {
        FormInput {
            age: "27".to_string(),
            weight: "64".to_string(),
            height: "168".to_string(),
            fitness_goal: FitnessGoal::WeightLoss,
            number_of_days: "2".to_string(),
            fitness_level: FitnessLevel::Intermediate,
        }
    }

    fn generator(client: Arc<ScriptedGenerator>) -> PlanGenerator {
        PlanGenerator::new(client, GenerationOptions::json("test-model"), PromptLocale::english())
    }

    #[tokio::test]
    async fn generates_both_halves() {
        let client = Arc::new(ScriptedGenerator::new(vec![
            Ok(WORKOUT_JSON.to_string()),
            Ok(DIET_JSON.to_string()),
        ]));
        let plan = generator(client.clone()).generate(&input()).await.unwrap();

        assert_eq!(plan.workout_plan.schedule, vec!["Monday", "Thursday"]);
        assert_eq!(plan.workout_plan.exercises[0].routines[0].reps, 5);
        assert_eq!(plan.workout_plan.exercises[1].routines[0].sets, 1);
        assert_eq!(plan.diet_plan.daily_calories, 2400.0);
        assert_eq!(plan.diet_plan.meals.len(), 2);

        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].contains("workout plan"));
        assert!(prompts[1].contains("diet plan"));
    }

    #[tokio::test]
    async fn malformed_workout_json_aborts_before_diet_call() {
        let client = Arc::new(ScriptedGenerator::new(vec![
            Ok("{ not json".to_string()),
            Ok(DIET_JSON.to_string()),
        ]));
        let err = generator(client.clone()).generate(&input()).await.unwrap_err();

        assert!(matches!(err, GenerationError::Parse(_)));
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn diet_failure_discards_workout() {
        let client = Arc::new(ScriptedGenerator::new(vec![
            Ok(WORKOUT_JSON.to_string()),
            Err(GenerationError::Service("quota exceeded".to_string())),
        ]));
        let err = generator(client.clone()).generate(&input()).await.unwrap_err();

        assert!(matches!(err, GenerationError::Service(_)));
        assert_eq!(client.calls(), 2);
    }

    #[tokio::test]
    async fn wrong_shape_is_reported() {
        let client = Arc::new(ScriptedGenerator::new(vec![Ok(r#"{"plan": []}"#.to_string())]));
        let err = generator(client).generate(&input()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Shape(_)));
    }

    #[test]
    fn json_options_are_low_temperature() {
        let options = GenerationOptions::json("gemini-1.5-flash");
        assert_eq!(options.temperature, 0.4);
        assert_eq!(options.top_p, 0.9);
        assert_eq!(options.response_mime_type, "application/json");
    }
}
