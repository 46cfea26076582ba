use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize, strum::Display, strum::EnumString),
    serde(rename_all = "snake_case"),
    strum(serialize_all = "snake_case", ascii_case_insensitive)
)]
pub enum ExerciseType {
    Strength,
    Cardio,
    Flexibility,
    Sports,
}

/// One exercise within a workout. Which optional fields are filled depends
/// on the exercise type (sets/reps/weight for strength, duration/distance
/// for cardio), but nothing enforces that.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exercise {
    pub exercise_name: String,
    pub exercise_type: ExerciseType,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight_kg: Option<f64>,
    pub duration_minutes: Option<u32>,
    pub distance_km: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub workout_name: String,
    pub exercises: Vec<Exercise>,
    pub workout_date: DateTime<Utc>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
