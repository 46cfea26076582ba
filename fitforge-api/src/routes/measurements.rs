use actix_web::{delete, get, post, web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use fitforge_db::measurement::MeasurementRepository;
use fitforge_model::measurement::Measurement;

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{MeasurementCreate, Paging},
};

const DEFAULT_PAGE: u32 = 100;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_measurement)
        .service(list_measurements)
        .service(latest_measurement)
        .service(delete_measurement);
}

#[post("/api/measurements")]
async fn create_measurement(
    user: AuthUser,
    measurements: web::Data<dyn MeasurementRepository>,
    body: web::Json<MeasurementCreate>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    let now = Utc::now();
    let measurement = Measurement {
        id: Uuid::new_v4().to_string(),
        user_id: user.0.id,
        weight_kg: body.weight_kg,
        body_fat_pct: body.body_fat_pct,
        notes: body.notes,
        measured_at: body.measurement_date.unwrap_or(now),
        created_at: now,
    };
    measurements.insert(&measurement).await?;

    Ok(HttpResponse::Created().json(measurement))
}

#[get("/api/measurements")]
async fn list_measurements(
    user: AuthUser,
    measurements: web::Data<dyn MeasurementRepository>,
    paging: web::Query<Paging>,
) -> Result<HttpResponse, ApiError> {
    let entries = measurements
        .list(&user.0.id, paging.limit_or(DEFAULT_PAGE), paging.skip())
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/api/measurements/latest")]
async fn latest_measurement(
    user: AuthUser,
    measurements: web::Data<dyn MeasurementRepository>,
) -> Result<HttpResponse, ApiError> {
    let measurement = measurements
        .latest(&user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No measurements found".to_owned()))?;
    Ok(HttpResponse::Ok().json(measurement))
}

#[delete("/api/measurements/{id}")]
async fn delete_measurement(
    user: AuthUser,
    measurements: web::Data<dyn MeasurementRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if !measurements.delete(&user.0.id, &path).await? {
        return Err(ApiError::NotFound("Measurement not found".to_owned()));
    }
    Ok(HttpResponse::NoContent().finish())
}
