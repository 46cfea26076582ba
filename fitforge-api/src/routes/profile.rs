use actix_web::{delete, get, post, put, web, HttpResponse};

use fitforge_db::profile::ProfileRepository;

use crate::{auth::AuthUser, error::ApiError, models::ProfileUpdate};

const NOT_FOUND: &str = "Profile not found. Please create a profile first.";

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_profile)
        .service(create_profile)
        .service(update_profile)
        .service(delete_profile);
}

#[get("/profile")]
async fn get_profile(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
) -> Result<HttpResponse, ApiError> {
    let profile = profiles
        .find(&user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))?;
    Ok(HttpResponse::Ok().json(profile))
}

#[post("/profile")]
async fn create_profile(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
    body: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    if profiles.find(&user.0.id).await?.is_some() {
        return Err(ApiError::BadRequest(
            "Profile already exists. Use PUT to update.".to_owned(),
        ));
    }

    let profile = body.into_profile(user.0.id);
    profiles.upsert(&profile).await?;

    Ok(HttpResponse::Created().json(profile))
}

#[put("/profile")]
async fn update_profile(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
    body: web::Json<ProfileUpdate>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    let mut profile = profiles
        .find(&user.0.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(NOT_FOUND.to_owned()))?;

    body.apply(&mut profile);
    profiles.upsert(&profile).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[delete("/profile")]
async fn delete_profile(
    user: AuthUser,
    profiles: web::Data<dyn ProfileRepository>,
) -> Result<HttpResponse, ApiError> {
    if !profiles.delete(&user.0.id).await? {
        return Err(ApiError::NotFound("Profile not found".to_owned()));
    }
    Ok(HttpResponse::NoContent().finish())
}
