// /pos-dashboard/services/pos-service/src/api/mod.rs

pub mod handlers;
pub mod routes;
