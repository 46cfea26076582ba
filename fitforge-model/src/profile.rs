use chrono::{DateTime, Utc};

/// Biological sex, as used by the Mifflin-St Jeor equation. Parsing accepts
/// the short tokens "m"/"f" as well, case-insensitively; anything else is
/// rejected at the boundary rather than defaulting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString),
    serde(rename_all = "lowercase"),
    strum(ascii_case_insensitive)
)]
pub enum Sex {
    #[cfg_attr(feature = "serde", strum(to_string = "male", serialize = "m"))]
    Male,
    #[cfg_attr(feature = "serde", strum(to_string = "female", serialize = "f"))]
    Female,
}

/// Self-reported activity level. The multiplier mapping is part of the
/// module contract, not configuration; see [`ActivityLevel::multiplier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString),
    serde(rename_all = "snake_case"),
    strum(serialize_all = "snake_case", ascii_case_insensitive)
)]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// TDEE multiplier applied to BMR.
    pub fn multiplier(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString),
    serde(rename_all = "snake_case"),
    strum(serialize_all = "snake_case", ascii_case_insensitive)
)]
pub enum FitnessGoal {
    LoseWeight,
    Maintain,
    GainMuscle,
    ImproveFitness,
}

/// A user's body-composition profile. Every field except the timestamps is
/// optional: the profile is filled in incrementally, and consumers that need
/// specific fields (e.g. the TDEE-from-profile endpoint) check for them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Profile {
    pub user_id: String,
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    pub goal_intensity: Option<u8>,
    pub target_calories: Option<i32>,
    pub updated_at: DateTime<Utc>,
}
