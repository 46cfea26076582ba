pub mod client;
pub mod prompt;

pub use client::{create, CoachClient, Error, GeminiClient, MockCoachClient};
pub use prompt::{ChatMessage, UserContext};
