use chrono::{DateTime, Utc};

/// A registered account. `password_hash` is the bcrypt hash of the
/// password; the API layer never serializes it back to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
