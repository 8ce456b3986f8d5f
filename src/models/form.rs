use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    WeightLoss,
    MuscleGain,
    Maintenance,
    ImprovedEndurance,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 4] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Maintenance,
        FitnessGoal::ImprovedEndurance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "weight_loss",
            FitnessGoal::MuscleGain => "muscle_gain",
            FitnessGoal::Maintenance => "maintenance",
            FitnessGoal::ImprovedEndurance => "improved_endurance",
        }
    }

    /// Option label shown on the form.
    pub fn label(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "წონის კლება",
            FitnessGoal::MuscleGain => "კუნთის მატება",
            FitnessGoal::Maintenance => "ფორმის შენარჩუნება",
            FitnessGoal::ImprovedEndurance => "გამძლეობის გაუმჯობესობა",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FitnessLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "beginner",
            FitnessLevel::Intermediate => "intermediate",
            FitnessLevel::Advanced => "advanced",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "დამწყები",
            FitnessLevel::Intermediate => "საშუალო",
            FitnessLevel::Advanced => "ათლეტი",
        }
    }
}

/// The six fields collected by the plan form.
///
/// Numeric fields stay as the text the user typed; they are only ever
/// embedded in prompts and echoed back on the dashboard.
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FormInput {
    #[validate(length(min = 1, message = "Age is required"))]
    pub age: String,

    #[validate(length(min = 1, message = "Weight is required"))]
    pub weight: String,

    #[validate(length(min = 1, message = "Height is required"))]
    pub height: String,

    pub fitness_goal: FitnessGoal,

    #[validate(length(min = 1, message = "Number of days is required"))]
    pub number_of_days: String,

    pub fitness_level: FitnessLevel,
}
