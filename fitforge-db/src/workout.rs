use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use fitforge_model::workout::Workout;

use crate::{connection::Connection, Result};

#[mockall::automock]
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    async fn insert(&self, workout: &Workout) -> Result<()>;
    async fn list(&self, user_id: &str, limit: u32, skip: u32) -> Result<Vec<Workout>>;
    async fn latest(&self, user_id: &str) -> Result<Option<Workout>>;
    async fn find(&self, user_id: &str, id: &str) -> Result<Option<Workout>>;
    async fn update(&self, workout: &Workout) -> Result<bool>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct WorkoutRepositoryImpl {
    connection: Connection,
}

impl WorkoutRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn from_row(row: &SqliteRow) -> Result<Workout> {
    let exercises: String = row.try_get("exercises")?;
    Ok(Workout {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        workout_name: row.try_get("workout_name")?,
        exercises: serde_json::from_str(&exercises)?,
        workout_date: row.try_get::<DateTime<Utc>, _>("workout_date")?,
        duration_minutes: row.try_get::<Option<u32>, _>("duration_minutes")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn insert(&self, workout: &Workout) -> Result<()> {
        let exercises = serde_json::to_string(&workout.exercises)?;
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO workouts (id, user_id, workout_name, exercises,
                workout_date, duration_minutes, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&workout.id)
        .bind(&workout.user_id)
        .bind(&workout.workout_name)
        .bind(exercises)
        .bind(workout.workout_date)
        .bind(workout.duration_minutes)
        .bind(&workout.notes)
        .bind(workout.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn list(&self, user_id: &str, limit: u32, skip: u32) -> Result<Vec<Workout>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "SELECT * FROM workouts WHERE user_id = ?
             ORDER BY workout_date DESC LIMIT ? OFFSET ?",
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

    async fn latest(&self, user_id: &str) -> Result<Option<Workout>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "SELECT * FROM workouts WHERE user_id = ?
             ORDER BY workout_date DESC LIMIT 1",
        )
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await?
        .map(|row| from_row(&row))
        .transpose()
    }

    async fn find(&self, user_id: &str, id: &str) -> Result<Option<Workout>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("SELECT * FROM workouts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
            .map(|row| from_row(&row))
            .transpose()
    }

    async fn update(&self, workout: &Workout) -> Result<bool> {
        let exercises = serde_json::to_string(&workout.exercises)?;
        let mut conn = self.connection.lock().await;
        let result = sqlx::query(
            "UPDATE workouts SET workout_name = ?, exercises = ?, workout_date = ?,
                duration_minutes = ?, notes = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(&workout.workout_name)
        .bind(exercises)
        .bind(workout.workout_date)
        .bind(workout.duration_minutes)
        .bind(&workout.notes)
        .bind(&workout.id)
        .bind(&workout.user_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut conn = self.connection.lock().await;
        let result = sqlx::query("DELETE FROM workouts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
