use std::env;

use dotenv::dotenv;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_TOKEN_EXPIRY_MINUTES: i64 = 24 * 60;

#[derive(Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,
    pub gemini_api_key: String,
}

impl Settings {
    /// Read configuration from the environment, loading `.env` first.
    /// JWT_SECRET and GEMINI_API_KEY are required; the rest has defaults.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned()),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            token_expiry_minutes: env::var("TOKEN_EXPIRY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TOKEN_EXPIRY_MINUTES),
            gemini_api_key: env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set"),
        }
    }
}
