pub mod api;
pub mod common;
pub mod config;
pub mod models;
pub mod screens;
pub mod services;

pub use common::error::AppError;
pub use config::{AppConfig, AppState};
