use std::{fmt::Display, str::FromStr};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use fitforge_model::profile::Profile;

use crate::{connection::Connection, Result, StoreError};

fn parse_enum_opt<T>(value: Option<String>) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .map(|s| s.parse().map_err(|e: T::Err| StoreError::Value(e.to_string())))
        .transpose()
}

/// Existence checks (profile already created, profile missing) are the API
/// layer's job via `find`; writes are a plain upsert.
#[mockall::automock]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find(&self, user_id: &str) -> Result<Option<Profile>>;
    async fn upsert(&self, profile: &Profile) -> Result<()>;
    async fn delete(&self, user_id: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct ProfileRepositoryImpl {
    connection: Connection,
}

impl ProfileRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn from_row(row: &SqliteRow) -> Result<Profile> {
    Ok(Profile {
        user_id: row.try_get("user_id")?,
        age: row.try_get::<Option<u32>, _>("age")?,
        sex: parse_enum_opt(row.try_get("sex")?)?,
        height_cm: row.try_get("height_cm")?,
        current_weight_kg: row.try_get("current_weight_kg")?,
        target_weight_kg: row.try_get("target_weight_kg")?,
        activity_level: parse_enum_opt(row.try_get("activity_level")?)?,
        fitness_goal: parse_enum_opt(row.try_get("fitness_goal")?)?,
        goal_intensity: row.try_get::<Option<u8>, _>("goal_intensity")?,
        target_calories: row.try_get("target_calories")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

const UPSERT_QUERY: &str = "INSERT INTO profiles (user_id, age, sex, height_cm,
    current_weight_kg, target_weight_kg, activity_level, fitness_goal,
    goal_intensity, target_calories, updated_at)
 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
 ON CONFLICT (user_id) DO UPDATE SET
    age = excluded.age,
    sex = excluded.sex,
    height_cm = excluded.height_cm,
    current_weight_kg = excluded.current_weight_kg,
    target_weight_kg = excluded.target_weight_kg,
    activity_level = excluded.activity_level,
    fitness_goal = excluded.fitness_goal,
    goal_intensity = excluded.goal_intensity,
    target_calories = excluded.target_calories,
    updated_at = excluded.updated_at";

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn find(&self, user_id: &str) -> Result<Option<Profile>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("SELECT * FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
            .map(|row| from_row(&row))
            .transpose()
    }

    async fn upsert(&self, profile: &Profile) -> Result<()> {
        let mut conn = self.connection.lock().await;
        sqlx::query(UPSERT_QUERY)
            .bind(&profile.user_id)
            .bind(profile.age)
            .bind(profile.sex.map(|s| s.to_string()))
            .bind(profile.height_cm)
            .bind(profile.current_weight_kg)
            .bind(profile.target_weight_kg)
            .bind(profile.activity_level.map(|a| a.to_string()))
            .bind(profile.fitness_goal.map(|g| g.to_string()))
            .bind(profile.goal_intensity)
            .bind(profile.target_calories)
            .bind(profile.updated_at)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<bool> {
        let mut conn = self.connection.lock().await;
        let result = sqlx::query("DELETE FROM profiles WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
