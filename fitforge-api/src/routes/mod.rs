pub mod auth;
pub mod calculations;
pub mod coach;
pub mod measurements;
pub mod nutrition;
pub mod profile;
pub mod workouts;
