use actix_web::{post, web, HttpResponse};
use chrono::Utc;
use log::warn;

use fitforge_coach::{
    prompt::{self, UserContext},
    CoachClient,
};
use fitforge_db::{
    meal::MealRepository, measurement::MeasurementRepository, profile::ProfileRepository,
    workout::WorkoutRepository,
};

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{ChatRequest, ChatResponse, WorkoutPlanRequest, WorkoutSuggestionRequest},
};

/// How much recent history feeds the coaching context.
const RECENT_ENTRIES: u32 = 5;

const FALLBACK_REPLY: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(chat)
        .service(generate_workout_plan)
        .service(suggest_workout);
}

async fn profile_context(
    user_id: &str,
    profiles: &web::Data<dyn ProfileRepository>,
) -> Result<UserContext, ApiError> {
    Ok(UserContext {
        profile: profiles.find(user_id).await?,
        ..Default::default()
    })
}

#[post("/ai-coach/chat")]
async fn chat(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
    measurements: web::Data<dyn MeasurementRepository>,
    workouts: web::Data<dyn WorkoutRepository>,
    meals: web::Data<dyn MealRepository>,
    client: web::Data<dyn CoachClient>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = &user.0.id;
    let context = UserContext {
        profile: profiles.find(user_id).await?,
        latest_measurement: measurements.latest(user_id).await?,
        recent_workout_count: workouts.list(user_id, RECENT_ENTRIES, 0).await?.len(),
        recent_meal_count: meals.list(user_id, RECENT_ENTRIES, 0).await?.len(),
    };

    let full_prompt = prompt::chat_prompt(&context, &body.conversation_history, &body.message);

    // A flaky upstream should read as the coach being briefly unavailable,
    // not as a failed request.
    let response = match client.generate(&full_prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!("coach chat generation failed: {e}");
            FALLBACK_REPLY.to_owned()
        }
    };

    Ok(HttpResponse::Ok().json(ChatResponse {
        response,
        timestamp: Utc::now(),
    }))
}

#[post("/ai-coach/generate-workout-plan")]
async fn generate_workout_plan(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
    client: web::Data<dyn CoachClient>,
    body: web::Json<WorkoutPlanRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    let context = profile_context(&user.0.id, &profiles).await?;
    let goal = body.goal.to_string();
    let full_prompt = prompt::workout_plan_prompt(
        &context,
        &goal,
        &body.experience_level,
        body.days_per_week,
        &body.equipment_available,
        body.duration_per_session,
    );

    let plan_text = client
        .generate(&full_prompt)
        .await
        .map_err(|_| ApiError::Upstream("Failed to generate workout plan".to_owned()))?;

    let goal_label = goal.replace('_', " ");
    let duration_weeks = if body.experience_level == "beginner" { 8 } else { 12 };
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "plan_name": format!("{} {} Plan", title_case(&body.experience_level), title_case(&goal_label)),
        "description": format!(
            "A {}-day per week program designed for {}",
            body.days_per_week, goal_label
        ),
        "duration_weeks": duration_weeks,
        "ai_generated_plan": plan_text,
        "created_at": Utc::now(),
    })))
}

#[post("/ai-coach/suggest-workout")]
async fn suggest_workout(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
    client: web::Data<dyn CoachClient>,
    body: web::Json<WorkoutSuggestionRequest>,
) -> Result<HttpResponse, ApiError> {
    let context = profile_context(&user.0.id, &profiles).await?;
    let full_prompt = prompt::workout_suggestion_prompt(&context, &body.message);

    let reply = client
        .generate(&full_prompt)
        .await
        .map_err(|_| ApiError::Upstream("Failed to generate workout suggestion".to_owned()))?;

    // A reply the parser cannot make sense of still reaches the client as
    // free text, flagged so the UI knows there is nothing to save.
    let candidate = prompt::json_candidate(&reply);
    let mut workout = match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(value) => value,
        Err(_) => {
            return Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": false,
                "error": "Failed to generate structured workout",
                "fallback_text": candidate,
            })));
        }
    };

    if let Some(object) = workout.as_object_mut() {
        let named = object
            .get("workout_name")
            .and_then(|v| v.as_str())
            .is_some_and(|name| !name.is_empty());
        if !named {
            object.insert(
                "workout_name".to_owned(),
                serde_json::json!("AI Suggested Workout"),
            );
        }
    }

    let has_exercises = workout
        .get("exercises")
        .and_then(|e| e.as_array())
        .is_some_and(|exercises| !exercises.is_empty());
    if !has_exercises {
        return Err(ApiError::Upstream(
            "Failed to generate workout suggestion".to_owned(),
        ));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "workout": workout,
        "message": "Here's a workout I've created for you! You can review it and save it directly to your workout log.",
    })))
}

fn title_case(words: &str) -> String {
    words
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
