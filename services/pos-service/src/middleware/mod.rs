// /pos-dashboard/services/pos-service/src/middleware/mod.rs

pub mod auth;
pub mod security;
