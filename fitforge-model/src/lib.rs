pub mod energy;
pub mod measurement;
pub mod nutrition;
pub mod profile;
pub mod user;
pub mod workout;
