use std::sync::Arc;

use actix_web::{test, web, App};
use chrono::Utc;

use fitforge_api::{
    auth::{create_access_token, hash_password},
    config::Settings,
    routes,
};
use fitforge_coach::{CoachClient, MockCoachClient};
use fitforge_db::{
    meal::{MealRepository, MockMealRepository},
    measurement::{MeasurementRepository, MockMeasurementRepository},
    profile::{MockProfileRepository, ProfileRepository},
    user::{MockUserRepository, UserRepository},
};
use fitforge_model::{
    profile::{ActivityLevel, Profile, Sex},
    user::User,
};

const JWT_SECRET: &str = "test-secret";

fn test_settings() -> Settings {
    Settings {
        bind_addr: "127.0.0.1:0".to_owned(),
        jwt_secret: JWT_SECRET.to_owned(),
        token_expiry_minutes: 60,
        gemini_api_key: "unused".to_owned(),
    }
}

fn test_user() -> User {
    User {
        id: "user-1".to_owned(),
        email: "jo@example.com".to_owned(),
        name: Some("Jo".to_owned()),
        password_hash: hash_password("password123").unwrap(),
        created_at: Utc::now(),
    }
}

fn bearer_token(user_id: &str) -> String {
    format!(
        "Bearer {}",
        create_access_token(user_id, JWT_SECRET, 60).unwrap()
    )
}

/// Users repository that authenticates `test_user` on any id lookup.
fn known_user_repository() -> MockUserRepository {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .returning(|_| Ok(Some(test_user())));
    users
}

fn empty_profile() -> Profile {
    Profile {
        user_id: "user-1".to_owned(),
        age: None,
        sex: None,
        height_cm: None,
        current_weight_kg: None,
        target_weight_kg: None,
        activity_level: None,
        fitness_goal: None,
        goal_intensity: None,
        target_calories: None,
        updated_at: Utc::now(),
    }
}

#[actix_web::test]
async fn register_rejects_duplicate_email() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user())));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .configure(routes::auth::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "email": "jo@example.com",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Email already registered");
}

#[actix_web::test]
async fn register_creates_user() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_email().returning(|_| Ok(None));
    users.expect_insert().returning(|_| Ok(()));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .configure(routes::auth::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "email": "new@example.com",
            "password": "password123",
            "name": "New User"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "new@example.com");
    assert_eq!(body["name"], "New User");
    assert!(body.get("password_hash").is_none());
}

#[actix_web::test]
async fn register_rejects_short_password() {
    let users = MockUserRepository::new();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .configure(routes::auth::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(serde_json::json!({
            "email": "new@example.com",
            "password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
}

#[actix_web::test]
async fn login_rejects_wrong_password() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user())));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .configure(routes::auth::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({
            "email": "jo@example.com",
            "password": "not-the-password"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Incorrect email or password");
}

#[actix_web::test]
async fn login_issues_token_for_the_right_user() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user())));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .configure(routes::auth::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(serde_json::json!({
            "email": "jo@example.com",
            "password": "password123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");
    let token = body["access_token"].as_str().unwrap();
    assert_eq!(
        fitforge_api::auth::decode_access_token(token, JWT_SECRET),
        Some("user-1".to_owned())
    );
}

#[actix_web::test]
async fn me_requires_a_token() {
    let users = known_user_repository();

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .configure(routes::auth::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", bearer_token("user-1")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], "user-1");
}

#[actix_web::test]
async fn tdee_endpoint_matches_reference_case() {
    let app = test::init_service(App::new().configure(routes::calculations::configure)).await;

    let req = test::TestRequest::post()
        .uri("/calculations/tdee")
        .set_json(serde_json::json!({
            "weight_kg": 80,
            "height_cm": 180,
            "age": 25,
            "sex": "male",
            "activity_level": "sedentary"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["bmr"], 1805.0);
    assert_eq!(body["activity_multiplier"], 1.2);
    assert_eq!(body["tdee"], 2166.0);
    assert_eq!(body["maintenance_calories"], 2166.0);
    assert_eq!(body["protein_g"], 160.0);
    assert_eq!(body["mild_weight_loss"], 1916.0);
    assert_eq!(body["fast_weight_gain"], 3166.0);
}

#[actix_web::test]
async fn tdee_endpoint_rejects_out_of_range_input() {
    let app = test::init_service(App::new().configure(routes::calculations::configure)).await;

    let req = test::TestRequest::post()
        .uri("/calculations/tdee")
        .set_json(serde_json::json!({
            "weight_kg": -5,
            "height_cm": 180,
            "age": 12,
            "sex": "female",
            "activity_level": "light"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 422);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.contains("weight_kg"));
    assert!(detail.contains("age"));
}

#[actix_web::test]
async fn bmi_endpoint_classifies() {
    let app = test::init_service(App::new().configure(routes::calculations::configure)).await;

    let req = test::TestRequest::get()
        .uri("/calculations/bmi?weight_kg=80&height_cm=180")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["bmi"], 24.69);
    assert_eq!(body["category"], "Normal weight");

    let req = test::TestRequest::get()
        .uri("/calculations/bmi?weight_kg=95&height_cm=170")
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["bmi"], 32.87);
    assert_eq!(body["category"], "Obese");
}

#[actix_web::test]
async fn bmi_endpoint_rejects_nonpositive_input() {
    let app = test::init_service(App::new().configure(routes::calculations::configure)).await;

    let req = test::TestRequest::get()
        .uri("/calculations/bmi?weight_kg=0&height_cm=180")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn tdee_from_profile_reports_missing_fields() {
    let users = known_user_repository();
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find().returning(|_| {
        Ok(Some(Profile {
            age: Some(25),
            height_cm: Some(180.0),
            ..empty_profile()
        }))
    });

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(
                Arc::new(profiles) as Arc<dyn ProfileRepository>
            ))
            .configure(routes::calculations::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/calculations/tdee/from-profile")
        .insert_header(("Authorization", bearer_token("user-1")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["detail"],
        "Profile is incomplete. Missing fields: sex, current_weight_kg, activity_level"
    );
}

#[actix_web::test]
async fn tdee_from_profile_computes_from_stored_fields() {
    let users = known_user_repository();
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find().returning(|_| {
        Ok(Some(Profile {
            age: Some(25),
            sex: Some(Sex::Male),
            height_cm: Some(180.0),
            current_weight_kg: Some(80.0),
            activity_level: Some(ActivityLevel::Sedentary),
            ..empty_profile()
        }))
    });

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(
                Arc::new(profiles) as Arc<dyn ProfileRepository>
            ))
            .configure(routes::calculations::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/calculations/tdee/from-profile")
        .insert_header(("Authorization", bearer_token("user-1")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["bmr"], 1805.0);
    assert_eq!(body["tdee"], 2166.0);
}

#[actix_web::test]
async fn latest_measurement_404s_when_history_is_empty() {
    let users = known_user_repository();
    let mut measurements = MockMeasurementRepository::new();
    measurements.expect_latest().returning(|_| Ok(None));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(
                Arc::new(measurements) as Arc<dyn MeasurementRepository>
            ))
            .configure(routes::measurements::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/api/measurements/latest")
        .insert_header(("Authorization", bearer_token("user-1")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn login_accepts_the_form_encoding() {
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_email()
        .returning(|_| Ok(Some(test_user())));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .configure(routes::auth::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_form([("username", "jo@example.com"), ("password", "password123")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["token_type"], "bearer");
    assert!(body["access_token"].as_str().is_some());
}

#[actix_web::test]
async fn created_measurement_serializes_measurement_date() {
    let users = known_user_repository();
    let mut measurements = MockMeasurementRepository::new();
    measurements.expect_insert().returning(|_| Ok(()));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(
                Arc::new(measurements) as Arc<dyn MeasurementRepository>
            ))
            .configure(routes::measurements::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/measurements")
        .insert_header(("Authorization", bearer_token("user-1")))
        .set_json(serde_json::json!({
            "weight_kg": 80.5,
            "measurement_date": "2026-08-20T07:30:00Z"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    // The timestamp keeps its wire name on the way out.
    assert!(body.get("measurement_date").is_some());
    assert!(body.get("measured_at").is_none());
    assert_eq!(body["weight_kg"], 80.5);
}

#[actix_web::test]
async fn todays_summary_sums_meal_totals() {
    use fitforge_model::nutrition::{Meal, MealType};

    let users = known_user_repository();
    let mut meals = MockMealRepository::new();
    meals.expect_list_since().returning(|user_id, _| {
        let meal = |id: &str, calories: f64, protein: f64| Meal {
            id: id.to_owned(),
            user_id: user_id.to_owned(),
            meal_type: MealType::Lunch,
            foods: Vec::new(),
            total_calories: calories,
            total_protein_g: protein,
            total_carbs_g: 40.0,
            total_fat_g: 10.0,
            meal_date: Utc::now(),
            notes: None,
            created_at: Utc::now(),
        };
        Ok(vec![meal("meal-1", 450.0, 30.0), meal("meal-2", 550.0, 25.0)])
    });

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(Arc::new(meals) as Arc<dyn MealRepository>))
            .configure(routes::nutrition::configure),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/nutrition/summary/today")
        .insert_header(("Authorization", bearer_token("user-1")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["total_calories"], 1000.0);
    assert_eq!(body["total_protein_g"], 55.0);
    assert_eq!(body["total_carbs_g"], 80.0);
    assert_eq!(body["total_fat_g"], 20.0);
    assert_eq!(body["meals_logged"], 2);
    assert!(body["date"].as_str().is_some());
}

#[actix_web::test]
async fn updating_a_meal_recomputes_totals() {
    use fitforge_model::nutrition::{FoodItem, Meal, MealType};

    let users = known_user_repository();
    let mut meals = MockMealRepository::new();
    meals.expect_find().returning(|user_id, id| {
        Ok(Some(Meal {
            id: id.to_owned(),
            user_id: user_id.to_owned(),
            meal_type: MealType::Lunch,
            foods: vec![FoodItem {
                food_name: "Oats".to_owned(),
                calories: 150.0,
                protein_g: Some(5.0),
                carbs_g: Some(27.0),
                fat_g: Some(3.0),
                serving_size: None,
            }],
            total_calories: 150.0,
            total_protein_g: 5.0,
            total_carbs_g: 27.0,
            total_fat_g: 3.0,
            meal_date: Utc::now(),
            notes: None,
            created_at: Utc::now(),
        }))
    });
    meals.expect_update().returning(|_| Ok(true));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(Arc::new(meals) as Arc<dyn MealRepository>))
            .configure(routes::nutrition::configure),
    )
    .await;

    let req = test::TestRequest::put()
        .uri("/nutrition/meal-1")
        .insert_header(("Authorization", bearer_token("user-1")))
        .set_json(serde_json::json!({
            "meal_type": "dinner",
            "foods": [
                { "food_name": "Chicken breast", "calories": 280.0, "protein_g": 53.0 },
                { "food_name": "Rice", "calories": 200.0, "carbs_g": 45.0 }
            ]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["meal_type"], "dinner");
    assert_eq!(body["total_calories"], 480.0);
    assert_eq!(body["total_protein_g"], 53.0);
    assert_eq!(body["total_carbs_g"], 45.0);
    assert_eq!(body["total_fat_g"], 0.0);
}

fn coach_app_mocks() -> (
    MockProfileRepository,
    MockMeasurementRepository,
    fitforge_db::workout::MockWorkoutRepository,
    MockMealRepository,
) {
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find().returning(|_| Ok(None));
    let mut measurements = MockMeasurementRepository::new();
    measurements.expect_latest().returning(|_| Ok(None));
    let mut workouts = fitforge_db::workout::MockWorkoutRepository::new();
    workouts.expect_list().returning(|_, _, _| Ok(Vec::new()));
    let mut meals = MockMealRepository::new();
    meals.expect_list().returning(|_, _, _| Ok(Vec::new()));
    (profiles, measurements, workouts, meals)
}

#[actix_web::test]
async fn chat_returns_model_reply() {
    let users = known_user_repository();
    let (profiles, measurements, workouts, meals) = coach_app_mocks();
    let mut coach = MockCoachClient::new();
    coach
        .expect_generate()
        .returning(|_| Ok("Keep up the good work!".to_owned()));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(
                Arc::new(profiles) as Arc<dyn ProfileRepository>
            ))
            .app_data(web::Data::from(
                Arc::new(measurements) as Arc<dyn MeasurementRepository>
            ))
            .app_data(web::Data::from(Arc::new(workouts)
                as Arc<dyn fitforge_db::workout::WorkoutRepository>))
            .app_data(web::Data::from(Arc::new(meals) as Arc<dyn MealRepository>))
            .app_data(web::Data::from(Arc::new(coach) as Arc<dyn CoachClient>))
            .configure(routes::coach::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai-coach/chat")
        .insert_header(("Authorization", bearer_token("user-1")))
        .set_json(serde_json::json!({ "message": "How am I doing?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["response"], "Keep up the good work!");
}

#[actix_web::test]
async fn chat_degrades_to_fallback_when_model_is_down() {
    let users = known_user_repository();
    let (profiles, measurements, workouts, meals) = coach_app_mocks();
    let mut coach = MockCoachClient::new();
    coach
        .expect_generate()
        .returning(|_| Err(fitforge_coach::Error::CommunicationError));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(
                Arc::new(profiles) as Arc<dyn ProfileRepository>
            ))
            .app_data(web::Data::from(
                Arc::new(measurements) as Arc<dyn MeasurementRepository>
            ))
            .app_data(web::Data::from(Arc::new(workouts)
                as Arc<dyn fitforge_db::workout::WorkoutRepository>))
            .app_data(web::Data::from(Arc::new(meals) as Arc<dyn MealRepository>))
            .app_data(web::Data::from(Arc::new(coach) as Arc<dyn CoachClient>))
            .configure(routes::coach::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai-coach/chat")
        .insert_header(("Authorization", bearer_token("user-1")))
        .set_json(serde_json::json!({ "message": "Are you there?" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(
        body["response"],
        "I'm having trouble connecting right now. Please try again in a moment."
    );
}

async fn suggest_workout_response(reply: &'static str) -> actix_web::dev::ServiceResponse {
    let users = known_user_repository();
    let mut profiles = MockProfileRepository::new();
    profiles.expect_find().returning(|_| Ok(None));
    let mut coach = MockCoachClient::new();
    coach.expect_generate().returning(move |_| Ok(reply.to_owned()));

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(test_settings()))
            .app_data(web::Data::from(Arc::new(users) as Arc<dyn UserRepository>))
            .app_data(web::Data::from(
                Arc::new(profiles) as Arc<dyn ProfileRepository>
            ))
            .app_data(web::Data::from(Arc::new(coach) as Arc<dyn CoachClient>))
            .configure(routes::coach::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/ai-coach/suggest-workout")
        .insert_header(("Authorization", bearer_token("user-1")))
        .set_json(serde_json::json!({ "message": "quick upper body session" }))
        .to_request();
    test::call_service(&app, req).await
}

#[actix_web::test]
async fn suggest_workout_wraps_fenced_json_reply() {
    let resp = suggest_workout_response(
        "```json\n{\"exercises\": [{\"exercise_name\": \"Push-up\", \"exercise_type\": \"strength\", \"sets\": 3, \"reps\": 12}], \"duration_minutes\": 45}\n```",
    )
    .await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    // Missing name falls back to a default.
    assert_eq!(body["workout"]["workout_name"], "AI Suggested Workout");
    assert_eq!(body["workout"]["duration_minutes"], 45);
    assert!(body["message"].as_str().unwrap().contains("save it directly"));
}

#[actix_web::test]
async fn suggest_workout_returns_prose_as_fallback_text() {
    let resp = suggest_workout_response("Sure! Try three sets of push-ups and squats.").await;

    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to generate structured workout");
    assert_eq!(
        body["fallback_text"],
        "Sure! Try three sets of push-ups and squats."
    );
}

#[actix_web::test]
async fn suggest_workout_rejects_a_workout_without_exercises() {
    let resp =
        suggest_workout_response("{\"workout_name\": \"Empty\", \"exercises\": []}").await;
    assert_eq!(resp.status(), 502);
}
