//! Request and response bodies. Field names are the wire contract; keep
//! them in sync with the clients rather than renaming for style.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fitforge_coach::ChatMessage;
use fitforge_model::{
    energy::{AnthropometricInput, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_AGE, MAX_AGE},
    nutrition::{FoodItem, MealType},
    profile::{ActivityLevel, FitnessGoal, Profile, Sex},
    user::User,
    workout::Exercise,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !self.email.contains('@') {
            return Err("email must be a valid email address".to_owned());
        }
        if self.password.chars().count() < 8 {
            return Err("password must be at least 8 characters".to_owned());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// OAuth2-style form login. The form field is `username` but carries the
/// account email.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserOut {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserOut {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer",
        }
    }
}

/// Body for both profile creation and partial update; absent fields keep
/// their stored value on update.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub age: Option<u32>,
    pub sex: Option<Sex>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub target_weight_kg: Option<f64>,
    pub activity_level: Option<ActivityLevel>,
    pub fitness_goal: Option<FitnessGoal>,
    pub goal_intensity: Option<u8>,
    pub target_calories: Option<i32>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<(), String> {
        let mut violations = Vec::new();
        if let Some(age) = self.age {
            if !(MIN_AGE..=MAX_AGE).contains(&age) {
                violations.push(format!("age must be between {MIN_AGE} and {MAX_AGE}"));
            }
        }
        if let Some(height_cm) = self.height_cm {
            if !(height_cm > 0.0 && height_cm <= MAX_HEIGHT_CM) {
                violations.push(format!(
                    "height_cm must be greater than 0 and at most {MAX_HEIGHT_CM}"
                ));
            }
        }
        for (field, value) in [
            ("current_weight_kg", self.current_weight_kg),
            ("target_weight_kg", self.target_weight_kg),
        ] {
            if let Some(weight_kg) = value {
                if !(weight_kg > 0.0 && weight_kg <= MAX_WEIGHT_KG) {
                    violations.push(format!(
                        "{field} must be greater than 0 and at most {MAX_WEIGHT_KG}"
                    ));
                }
            }
        }
        if let Some(intensity) = self.goal_intensity {
            if intensity > 3 {
                violations.push("goal_intensity must be between 0 and 3".to_owned());
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations.join("; "))
        }
    }

    /// Overlay onto an existing profile, FastAPI `exclude_none` style:
    /// only supplied fields replace stored values.
    pub fn apply(self, profile: &mut Profile) {
        if self.age.is_some() {
            profile.age = self.age;
        }
        if self.sex.is_some() {
            profile.sex = self.sex;
        }
        if self.height_cm.is_some() {
            profile.height_cm = self.height_cm;
        }
        if self.current_weight_kg.is_some() {
            profile.current_weight_kg = self.current_weight_kg;
        }
        if self.target_weight_kg.is_some() {
            profile.target_weight_kg = self.target_weight_kg;
        }
        if self.activity_level.is_some() {
            profile.activity_level = self.activity_level;
        }
        if self.fitness_goal.is_some() {
            profile.fitness_goal = self.fitness_goal;
        }
        if self.goal_intensity.is_some() {
            profile.goal_intensity = self.goal_intensity;
        }
        if self.target_calories.is_some() {
            profile.target_calories = self.target_calories;
        }
        profile.updated_at = Utc::now();
    }

    pub fn into_profile(self, user_id: String) -> Profile {
        let mut profile = Profile {
            user_id,
            age: None,
            sex: None,
            height_cm: None,
            current_weight_kg: None,
            target_weight_kg: None,
            activity_level: None,
            fitness_goal: None,
            goal_intensity: None,
            target_calories: None,
            updated_at: Utc::now(),
        };
        self.apply(&mut profile);
        profile
    }
}

#[derive(Debug, Deserialize)]
pub struct TdeeRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
}

impl TdeeRequest {
    pub fn input(&self) -> AnthropometricInput {
        AnthropometricInput {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age: self.age,
            sex: self.sex,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BmiQuery {
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Serialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: fitforge_model::energy::BmiCategory,
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Deserialize)]
pub struct Paging {
    pub limit: Option<u32>,
    pub skip: Option<u32>,
}

impl Paging {
    pub fn limit_or(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default)
    }

    pub fn skip(&self) -> u32 {
        self.skip.unwrap_or(0)
    }
}

#[derive(Debug, Deserialize)]
pub struct MeasurementCreate {
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub notes: Option<String>,
    pub measurement_date: Option<DateTime<Utc>>,
}

impl MeasurementCreate {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.weight_kg > 0.0 && self.weight_kg <= MAX_WEIGHT_KG) {
            return Err(format!(
                "weight_kg must be greater than 0 and at most {MAX_WEIGHT_KG}"
            ));
        }
        if let Some(pct) = self.body_fat_pct {
            if !(0.0..=100.0).contains(&pct) {
                return Err("body_fat_pct must be between 0 and 100".to_owned());
            }
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutCreate {
    pub workout_name: String,
    pub exercises: Vec<Exercise>,
    pub workout_date: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MealCreate {
    pub meal_type: MealType,
    pub foods: Vec<FoodItem>,
    pub meal_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct WorkoutPlanRequest {
    pub goal: FitnessGoal,
    pub experience_level: String,
    pub days_per_week: u8,
    #[serde(default)]
    pub equipment_available: Vec<String>,
    pub duration_per_session: u32,
}

impl WorkoutPlanRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=7).contains(&self.days_per_week) {
            return Err("days_per_week must be between 1 and 7".to_owned());
        }
        if !(15..=120).contains(&self.duration_per_session) {
            return Err("duration_per_session must be between 15 and 120 minutes".to_owned());
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct WorkoutSuggestionRequest {
    pub message: String,
}
