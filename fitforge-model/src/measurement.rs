use chrono::{DateTime, Utc};

/// A single weight/body-composition log entry. The timestamp rides the wire
/// as `measurement_date`, matching what clients send on create.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Measurement {
    pub id: String,
    pub user_id: String,
    pub weight_kg: f64,
    pub body_fat_pct: Option<f64>,
    pub notes: Option<String>,
    #[cfg_attr(feature = "serde", serde(rename = "measurement_date"))]
    pub measured_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
