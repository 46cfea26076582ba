use actix_web::{delete, get, post, put, web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;

use fitforge_db::meal::MealRepository;
use fitforge_model::nutrition::{FoodItem, Meal};

use crate::{
    auth::AuthUser,
    error::ApiError,
    models::{MealCreate, Paging},
};

const DEFAULT_PAGE: u32 = 30;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_meal)
        .service(list_meals)
        .service(todays_meals)
        .service(todays_summary)
        .service(get_meal)
        .service(update_meal)
        .service(delete_meal);
}

fn utc_midnight() -> chrono::DateTime<Utc> {
    Utc::now()
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .unwrap_or_default()
        .and_utc()
}

// Totals are fixed at logging time; absent macros count as zero.
fn totals(foods: &[FoodItem]) -> (f64, f64, f64, f64) {
    (
        foods.iter().map(|f| f.calories).sum(),
        foods.iter().filter_map(|f| f.protein_g).sum(),
        foods.iter().filter_map(|f| f.carbs_g).sum(),
        foods.iter().filter_map(|f| f.fat_g).sum(),
    )
}

#[post("/nutrition")]
async fn create_meal(
    user: AuthUser,
    meals: web::Data<dyn MealRepository>,
    body: web::Json<MealCreate>,
) -> Result<HttpResponse, ApiError> {
    let body = body.into_inner();
    let now = Utc::now();
    let (total_calories, total_protein_g, total_carbs_g, total_fat_g) = totals(&body.foods);

    let meal = Meal {
        id: Uuid::new_v4().to_string(),
        user_id: user.0.id,
        meal_type: body.meal_type,
        foods: body.foods,
        total_calories,
        total_protein_g,
        total_carbs_g,
        total_fat_g,
        meal_date: body.meal_date.unwrap_or(now),
        notes: body.notes,
        created_at: now,
    };
    meals.insert(&meal).await?;

    Ok(HttpResponse::Created().json(meal))
}

#[get("/nutrition")]
async fn list_meals(
    user: AuthUser,
    meals: web::Data<dyn MealRepository>,
    paging: web::Query<Paging>,
) -> Result<HttpResponse, ApiError> {
    let entries = meals
        .list(&user.0.id, paging.limit_or(DEFAULT_PAGE), paging.skip())
        .await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/nutrition/today")]
async fn todays_meals(
    user: AuthUser,
    meals: web::Data<dyn MealRepository>,
) -> Result<HttpResponse, ApiError> {
    let entries = meals.list_since(&user.0.id, utc_midnight()).await?;
    Ok(HttpResponse::Ok().json(entries))
}

#[get("/nutrition/summary/today")]
async fn todays_summary(
    user: AuthUser,
    meals: web::Data<dyn MealRepository>,
) -> Result<HttpResponse, ApiError> {
    let midnight = utc_midnight();
    let entries = meals.list_since(&user.0.id, midnight).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "date": midnight,
        "total_calories": entries.iter().map(|m| m.total_calories).sum::<f64>(),
        "total_protein_g": entries.iter().map(|m| m.total_protein_g).sum::<f64>(),
        "total_carbs_g": entries.iter().map(|m| m.total_carbs_g).sum::<f64>(),
        "total_fat_g": entries.iter().map(|m| m.total_fat_g).sum::<f64>(),
        "meals_logged": entries.len(),
    })))
}

#[get("/nutrition/{id}")]
async fn get_meal(
    user: AuthUser,
    meals: web::Data<dyn MealRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let meal = meals
        .find(&user.0.id, &path)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meal not found".to_owned()))?;
    Ok(HttpResponse::Ok().json(meal))
}

#[put("/nutrition/{id}")]
async fn update_meal(
    user: AuthUser,
    meals: web::Data<dyn MealRepository>,
    path: web::Path<String>,
    body: web::Json<MealCreate>,
) -> Result<HttpResponse, ApiError> {
    let existing = meals
        .find(&user.0.id, &path)
        .await?
        .ok_or_else(|| ApiError::NotFound("Meal not found".to_owned()))?;

    let body = body.into_inner();
    let (total_calories, total_protein_g, total_carbs_g, total_fat_g) = totals(&body.foods);

    let meal = Meal {
        meal_type: body.meal_type,
        foods: body.foods,
        total_calories,
        total_protein_g,
        total_carbs_g,
        total_fat_g,
        meal_date: body.meal_date.unwrap_or(existing.meal_date),
        notes: body.notes,
        ..existing
    };
    if !meals.update(&meal).await? {
        return Err(ApiError::NotFound("Meal not found".to_owned()));
    }
    Ok(HttpResponse::Ok().json(meal))
}

#[delete("/nutrition/{id}")]
async fn delete_meal(
    user: AuthUser,
    meals: web::Data<dyn MealRepository>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    if !meals.delete(&user.0.id, &path).await? {
        return Err(ApiError::NotFound("Meal not found".to_owned()));
    }
    Ok(HttpResponse::Ok().json(serde_json::json!({"message": "Meal deleted successfully"})))
}
