use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use fitforge_db::workout::WorkoutRepository;
use fitforge_model::workout::Workout;

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{Paging, WorkoutCreate},
};

const DEFAULT_PAGE: u32 = 30;
const NOT_FOUND: &str = "Workout not found";

pub fn configure(cfg: &mut web::ServiceConfig) {
    // `/latest` must register before the `{id}` matcher.
    cfg.service(create_workout)
        .service(list_workouts)
        .service(latest_workout)
        .service(get_workout)
        .service(update_workout)
        .service(delete_workout);
}

fn build(user_id: String, id: String, body: WorkoutCreate, created_at: chrono::DateTime<Utc>) -> Workout {
    Workout {
        id,
        user_id,
        workout_name: body.workout_name,
        exercises: body.exercises,
        workout_date: body.workout_date.unwrap_or(created_at),
        duration_minutes: body.duration_minutes,
        notes: body.notes,
        created_at,
    }
}

#[post("/workouts")]
async fn create_workout(
    user: AuthUser,
    workouts: web::Data<dyn WorkoutRepository>,
    body: web::Json<WorkoutCreate>,
) -> Result<HttpResponse, ApiError> {
    let workout = build(
        user.0.id,
        Uuid::new_v4().to_string(),
        body.into_inner(),
        Utc::now(),
    );
    workouts.insert(&workout).await?;
    Ok(HttpResponse::Created().json(workout))
}

#[get("/workouts")]
async fn list_workouts(
    user: AuthUser,
    workouts: web::Data<dyn WorkoutRepository>,
    paging: web::Query<Paging>,
) -> Result<HttpResponse, ApiError> {
    let entries = workouts
        .list(&user.0.id, paging.limit_or(DEFAULT_PAGE), paging.skip())
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/workouts/latest")]
async fn latest_workout(
    user: AuthUser,
    workouts: web::Data<dyn WorkoutRepository>,
) -> Result<HttpResponse, ApiError> {
    let workout = workouts
        .latest(&user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No workouts found".to_owned()))?;
    Ok(HttpResponse::Ok().json(workout))
}

#[get("/workouts/{id}")]
async fn get_workout(
    user: AuthUser,
    workouts: web::Data<dyn WorkoutRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let workout = workouts
        .find(&user.0.id, &path)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))?;
    Ok(HttpResponse::Ok().json(workout))
}

#[put("/workouts/{id}")]
async fn update_workout(
    user: AuthUser,
    workouts: web::Data<dyn WorkoutRepository>,
    path: web::Path<String>,
    body: web::Json<WorkoutCreate>,
) -> Result<HttpResponse, ApiError> {
    let existing = workouts
        .find(&user.0.id, &path)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))?;

    let updated = build(
        existing.user_id,
        existing.id,
        body.into_inner(),
        existing.created_at,
    );
    if !workouts.update(&updated).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_owned()));
    }
    Ok(HttpResponse::Ok().json(updated))
}

#[delete("/workouts/{id}")]
async fn delete_workout(
    user: AuthUser,
    workouts: web::Data<dyn WorkoutRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if !workouts.delete(&user.0.id, &path).await? {
        return Err(ApiError::NotFound(NOT_FOUND.to_owned()));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Workout deleted successfully"
    })))
}
