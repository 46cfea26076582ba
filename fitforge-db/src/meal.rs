use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};

use fitforge_model::nutrition::{Meal, MealType};

use crate::{connection::Connection, Result, StoreError};

#[mockall::automock]
#[async_trait]
pub trait MealRepository: Send + Sync {
    async fn insert(&self, meal: &Meal) -> Result<()>;
    async fn list(&self, user_id: &str, limit: u32, skip: u32) -> Result<Vec<Meal>>;
    async fn list_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<Vec<Meal>>;
    async fn find(&self, user_id: &str, id: &str) -> Result<Option<Meal>>;
    async fn update(&self, meal: &Meal) -> Result<bool>;
    async fn delete(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[derive(Clone)]
pub struct MealRepositoryImpl {
    connection: Connection,
}

impl MealRepositoryImpl {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }
}

fn from_row(row: &SqliteRow) -> Result<Meal> {
    let meal_type: String = row.try_get("meal_type")?;
    let foods: String = row.try_get("foods")?;
    Ok(Meal {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        meal_type: MealType::from_str(&meal_type).map_err(|e| StoreError::Value(e.to_string()))?,
        foods: serde_json::from_str(&foods)?,
        total_calories: row.try_get("total_calories")?,
        total_protein_g: row.try_get("total_protein_g")?,
        total_carbs_g: row.try_get("total_carbs_g")?,
        total_fat_g: row.try_get("total_fat_g")?,
        meal_date: row.try_get::<DateTime<Utc>, _>("meal_date")?,
        notes: row.try_get("notes")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl MealRepository for MealRepositoryImpl {
    async fn insert(&self, meal: &Meal) -> Result<()> {
        let foods = serde_json::to_string(&meal.foods)?;
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "INSERT INTO meals (id, user_id, meal_type, foods, total_calories,
                total_protein_g, total_carbs_g, total_fat_g, meal_date, notes, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&meal.id)
        .bind(&meal.user_id)
        .bind(meal.meal_type.to_string())
        .bind(foods)
        .bind(meal.total_calories)
        .bind(meal.total_protein_g)
        .bind(meal.total_carbs_g)
        .bind(meal.total_fat_g)
        .bind(meal.meal_date)
        .bind(&meal.notes)
        .bind(meal.created_at)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }

    async fn list(&self, user_id: &str, limit: u32, skip: u32) -> Result<Vec<Meal>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "SELECT * FROM meals WHERE user_id = ?
             ORDER BY meal_date DESC LIMIT ? OFFSET ?",
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

    async fn list_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<Vec<Meal>> {
        let mut conn = self.connection.lock().await;
        sqlx::query(
            "SELECT * FROM meals WHERE user_id = ? AND meal_date >= ?
             ORDER BY meal_date DESC",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&mut *conn)
        .await?
        .iter()
        .map(from_row)
        .collect()
    }

    async fn find(&self, user_id: &str, id: &str) -> Result<Option<Meal>> {
        let mut conn = self.connection.lock().await;
        sqlx::query("SELECT * FROM meals WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *conn)
            .await?
            .map(|row| from_row(&row))
            .transpose()
    }

    async fn update(&self, meal: &Meal) -> Result<bool> {
        let foods = serde_json::to_string(&meal.foods)?;
        let mut conn = self.connection.lock().await;
        let result = sqlx::query(
            "UPDATE meals SET meal_type = ?, foods = ?, total_calories = ?,
                total_protein_g = ?, total_carbs_g = ?, total_fat_g = ?,
                meal_date = ?, notes = ?
             WHERE id = ? AND user_id = ?",
        )
        .bind(meal.meal_type.to_string())
        .bind(foods)
        .bind(meal.total_calories)
        .bind(meal.total_protein_g)
        .bind(meal.total_carbs_g)
        .bind(meal.total_fat_g)
        .bind(meal.meal_date)
        .bind(&meal.notes)
        .bind(&meal.id)
        .bind(&meal.user_id)
        .execute(&mut *conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, user_id: &str, id: &str) -> Result<bool> {
        let mut conn = self.connection.lock().await;
        let result = sqlx::query("DELETE FROM meals WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
