// /pos-dashboard/services/pos-service/src/utils/mod.rs
pub mod error;
pub mod config;
pub mod validator;
pub mod logger;
pub mod cors;
pub mod banner;
pub mod health;
