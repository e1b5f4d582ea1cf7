mod client;
pub mod payload;

pub use client::{ApiConfig, QuizApi, QuizBackend};
