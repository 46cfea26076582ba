use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpServer, Responder};
use log::info;

use fitforge_api::{config::Settings, routes};
use fitforge_coach::CoachClient;
use fitforge_db::{
    connection::Connection,
    meal::{MealRepository, MealRepositoryImpl},
    measurement::{MeasurementRepository, MeasurementRepositoryImpl},
    profile::{ProfileRepository, ProfileRepositoryImpl},
    user::{UserRepository, UserRepositoryImpl},
    workout::{WorkoutRepository, WorkoutRepositoryImpl},
};

#[get("/health")]
async fn health() -> impl Responder {
    web::Json(serde_json::json!({
        "status": "healthy",
        "service": "FitForge API"
    }))
}

#[get("/")]
async fn index() -> impl Responder {
    web::Json(serde_json::json!({
        "message": "FitForge API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    log4rs::init_file("log4rs.yml", Default::default()).unwrap();

    let settings = Settings::from_env();
    let bind_addr = settings.bind_addr.clone();

    info!("Connecting to database");
    let conn = Connection::establish().await.unwrap();

    let users: Arc<dyn UserRepository> = Arc::new(UserRepositoryImpl::new(conn.clone()));
    let profiles: Arc<dyn ProfileRepository> = Arc::new(ProfileRepositoryImpl::new(conn.clone()));
    let measurements: Arc<dyn MeasurementRepository> =
        Arc::new(MeasurementRepositoryImpl::new(conn.clone()));
    let workouts: Arc<dyn WorkoutRepository> = Arc::new(WorkoutRepositoryImpl::new(conn.clone()));
    let meals: Arc<dyn MealRepository> = Arc::new(MealRepositoryImpl::new(conn.clone()));
    let coach: Arc<dyn CoachClient> =
        Arc::new(fitforge_coach::create(settings.gemini_api_key.clone()));

    let users = web::Data::from(users);
    let profiles = web::Data::from(profiles);
    let measurements = web::Data::from(measurements);
    let workouts = web::Data::from(workouts);
    let meals = web::Data::from(meals);
    let coach = web::Data::from(coach);
    let settings = web::Data::new(settings);

    info!("Starting HTTP server on {bind_addr}");
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Cors::permissive())
            .app_data(settings.clone())
            .app_data(users.clone())
            .app_data(profiles.clone())
            .app_data(measurements.clone())
            .app_data(workouts.clone())
            .app_data(meals.clone())
            .app_data(coach.clone())
            .configure(routes::auth::configure)
            .configure(routes::profile::configure)
            .configure(routes::calculations::configure)
            .configure(routes::measurements::configure)
            .configure(routes::workouts::configure)
            .configure(routes::nutrition::configure)
            .configure(routes::coach::configure)
            .service(health)
            .service(index)
    })
    .bind(bind_addr)?
    .run()
    .await
}
