use actix_web::{get, post, web, Either, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use fitforge_db::user::UserRepository;
use fitforge_model::user::User;

use crate::{
    auth::{create_access_token, hash_password, verify_password, AuthUser},
    config::Settings,
    error::ApiError,
    models::{LoginForm, LoginRequest, RegisterRequest, TokenResponse, UserOut},
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(me);
}

#[post("/api/auth/register")]
async fn register(
    users: web::Data<dyn UserRepository>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    body.validate().map_err(ApiError::Validation)?;

    if users.find_by_email(&body.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_owned()));
    }

    let password_hash = hash_password(&body.password)
        .map_err(|e| ApiError::BadRequest(format!("unusable password: {e}")))?;
    let user = User {
        id: Uuid::new_v4().to_string(),
        email: body.email,
        name: body.name,
        password_hash,
        created_at: Utc::now(),
    };
    users.insert(&user).await?;

    Ok(HttpResponse::Created().json(UserOut::from(user)))
}

/// Login accepts the OAuth2 form encoding (`username` + `password`) as well
/// as a JSON body with `email` + `password`.
#[post("/api/auth/login")]
async fn login(
    users: web::Data<dyn UserRepository>,
    settings: web::Data<Settings>,
    body: Either<web::Form<LoginForm>, web::Json<LoginRequest>>,
) -> Result<HttpResponse, ApiError> {
    let invalid = || ApiError::Unauthorized("Incorrect email or password".to_owned());

    let (email, password) = match body {
        Either::Left(form) => {
            let form = form.into_inner();
            (form.username, form.password)
        }
        Either::Right(json) => {
            let json = json.into_inner();
            (json.email, json.password)
        }
    };

    let user = users.find_by_email(&email).await?.ok_or_else(invalid)?;
    if !verify_password(&password, &user.password_hash) {
        return Err(invalid());
    }

    let token = create_access_token(&user.id, &settings.jwt_secret, settings.token_expiry_minutes)
        .map_err(|_| invalid())?;

    Ok(HttpResponse::Ok().json(TokenResponse::bearer(token)))
}

#[get("/api/auth/me")]
async fn me(user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(UserOut::from(user.0))
}
