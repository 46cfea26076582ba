use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use fitforge_model::measurement::Measurement;

use crate::{connection::Connection, Result};

#[mockall::automock]
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    async fn insert(&self, measurement: &Measurement) -> Result<()>;
    async fn list(&self, user_id: &str, limit: u32, skip: u32) -> Result<Vec<Measurement>>;
    async fn latest(&self, user_id: &str) -> Result<Option<Measurement>>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct MeasurementRepositoryImpl {
    connection: Connection,
}

impl MeasurementRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn from_row(row: &SqliteRow) -> Result<Measurement> {
    Ok(Measurement {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        weight_kg: row.try_get("weight_kg")?,
        body_fat_pct: row.try_get("body_fat_pct")?,
        notes: row.try_get("notes")?,
        measured_at: row.try_get::<DateTime<Utc>, _>("measured_at")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl MeasurementRepository for MeasurementRepositoryImpl {
    async fn insert(&self, measurement: &Measurement) -> Result<()> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO measurements (id, user_id, weight_kg, body_fat_pct,
                notes, measured_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&measurement.id)
        .bind(&measurement.user_id)
        .bind(measurement.weight_kg)
        .bind(measurement.body_fat_pct)
        .bind(&measurement.notes)
        .bind(measurement.measured_at)
        .bind(measurement.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn list(&self, user_id: &str, limit: u32, skip: u32) -> Result<Vec<Measurement>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "SELECT * FROM measurements WHERE user_id = ?
             ORDER BY measured_at DESC LIMIT ? OFFSET ?",
        )
        .bind(user_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(from_row)
        .collect()
    }

    async fn latest(&self, user_id: &str) -> Result<Option<Measurement>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "SELECT * FROM measurements WHERE user_id = ?
             ORDER BY measured_at DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .map(|row| from_row(&row))
        .transpose()
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut conn = self.connection.lock().await;
        let result = sqlx::query("DELETE FROM measurements WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
