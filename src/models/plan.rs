use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;

/// A stored plan document, one row of `user_plans`.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: Uuid,
    pub user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub form_data: Option<Json<Value>>,
    pub workout_plan: Json<Value>,
    pub diet_plan: Json<Value>,
    pub created_at: DateTime<Utc>,
}

/// Everything needed to insert a plan; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub user_id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    pub form_data: Option<Value>,
    pub workout_plan: Value,
    pub diet_plan: Value,
    pub created_at: DateTime<Utc>,
}

impl NewPlan {
    /// Stamps the plan with the current time, truncated to the
    /// microsecond precision of `timestamptz`.
    pub fn stamped(
        user_id: String,
        username: Option<String>,
        email: Option<String>,
        image_url: Option<String>,
        form_data: Option<Value>,
        workout_plan: Value,
        diet_plan: Value,
    ) -> Self {
        NewPlan {
            user_id,
            username,
            email,
            image_url,
            form_data,
            workout_plan,
            diet_plan,
            created_at: Utc::now().trunc_subsecs(6),
        }
    }

    pub fn into_plan(self, id: Uuid) -> Plan {
        Plan {
            id,
            user_id: self.user_id,
            username: self.username,
            email: self.email,
            image_url: self.image_url,
            form_data: self.form_data.map(Json),
            workout_plan: Json(self.workout_plan),
            diet_plan: Json(self.diet_plan),
            created_at: self.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Routine {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseDay {
    pub day: String,
    pub routines: Vec<Routine>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutPlan {
    #[serde(default)]
    pub schedule: Vec<String>,
    pub exercises: Vec<ExerciseDay>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Meal {
    pub name: String,
    #[serde(default)]
    pub foods: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DietPlan {
    pub daily_calories: f64,
    pub meals: Vec<Meal>,
}

/// Output of one generation run: both halves or nothing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPlan {
    pub workout_plan: WorkoutPlan,
    pub diet_plan: DietPlan,
}

impl Plan {
    /// Typed view of the stored workout document, if it has the expected shape.
    pub fn workout(&self) -> Option<WorkoutPlan> {
        serde_json::from_value(self.workout_plan.0.clone()).ok()
    }

    pub fn diet(&self) -> Option<DietPlan> {
        serde_json::from_value(self.diet_plan.0.clone()).ok()
    }

    /// Reads a string field out of the stored form document.
    pub fn form_field(&self, key: &str) -> Option<String> {
        let value = self.form_data.as_ref()?.0.get(key)?;
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Display name used by the plan selector.
    pub fn title(&self) -> String {
        self.form_field("fitnessGoal")
            .map(|goal| goal.replacen('_', " ", 1))
            .unwrap_or_else(|| "Unnamed Plan".to_string())
    }
}
