use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use futures::future::LocalBoxFuture;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use fitforge_db::user::UserRepository;
use fitforge_model::user::User;

use crate::{config::Settings, error::ApiError};

// bcrypt ignores everything past 72 bytes; truncate explicitly so long
// passwords hash deterministically.
const BCRYPT_MAX_BYTES: usize = 72;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
    let bytes = password.as_bytes();
    let truncated = &bytes[..bytes.len().min(BCRYPT_MAX_BYTES)];
    bcrypt::hash(truncated, bcrypt::DEFAULT_COST)
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let bytes = password.as_bytes();
    let truncated = &bytes[..bytes.len().min(BCRYPT_MAX_BYTES)];
    bcrypt::verify(truncated, password_hash).unwrap_or(false)
}

/// Issue a bearer token for the given user id.
pub fn create_access_token(
    user_id: &str,
    secret: &str,
    expiry_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_owned(),
        exp: (Utc::now() + Duration::minutes(expiry_minutes)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Decode a bearer token, returning the user id it was issued for. Any
/// failure (bad signature, expiry, malformed token) is None; the caller
/// turns that into a uniform 401.
pub fn decode_access_token(token: &str, secret: &str) -> Option<String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims.sub)
}

/// Extractor for routes that require a logged-in user. Reads the bearer
/// token, decodes it, and loads the account from the store.
pub struct AuthUser(pub User);

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, ApiError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let settings = req
                .app_data::<web::Data<Settings>>()
                .ok_or_else(ApiError::unauthorized)?;
            let users = req
                .app_data::<web::Data<dyn UserRepository>>()
                .ok_or_else(ApiError::unauthorized)?;

            let token = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix("Bearer "))
                .ok_or_else(ApiError::unauthorized)?;

            let user_id = decode_access_token(token, &settings.jwt_secret)
                .ok_or_else(ApiError::unauthorized)?;

            let user = users
                .find_by_id(&user_id)
                .await?
                .ok_or_else(ApiError::unauthorized)?;

            Ok(AuthUser(user))
        })
    }
}
