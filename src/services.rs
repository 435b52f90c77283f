pub mod auth;
pub mod dashboard_service;
pub mod export_service;
pub mod token;
