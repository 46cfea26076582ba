pub mod connection;
pub mod error;
pub mod meal;
pub mod measurement;
pub mod profile;
pub mod user;
pub mod workout;

pub use error::{Result, StoreError};
