// /pos-dashboard/services/pos-service/src/utils/health.rs

use std::collections::HashMap;
use crate::repository::Repository;

#[derive(Debug, serde::Serialize)]
pub struct HealthCheckResult {
    pub service: &'static str,
    pub version: &'static str,
    pub status: HealthStatus,
    pub checks: HashMap<String, ComponentHealth>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, serde::Serialize, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

#[derive(Debug, serde::Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub message: Option<String>,
    pub response_time_ms: Option<u64>,
}

/// Liveness + database ping
pub async fn health_check(repository: &Repository) -> HealthCheckResult {
    let mut checks = HashMap::new();
    checks.insert("database".to_string(), check_database_health(repository).await);

    HealthCheckResult {
        service: "pos-service",
        version: env!("CARGO_PKG_VERSION"),
        status: determine_overall_status(&checks),
        checks,
        timestamp: chrono::Utc::now(),
    }
}

async fn check_database_health(repository: &Repository) -> ComponentHealth {
    let start = std::time::Instant::now();

    match sqlx::query("SELECT 1").fetch_one(repository.get_pool()).await {
        Ok(_) => ComponentHealth {
            name: "PostgreSQL".to_string(),
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => ComponentHealth {
            name: "PostgreSQL".to_string(),
            status: HealthStatus::Unhealthy,
            message: Some(format!("Database error: {}", e)),
            response_time_ms: None,
        },
    }
}

fn determine_overall_status(checks: &HashMap<String, ComponentHealth>) -> HealthStatus {
    if checks.values().any(|h| h.status == HealthStatus::Unhealthy) {
        return HealthStatus::Unhealthy;
    }
    if checks.values().any(|h| h.status == HealthStatus::Degraded) {
        return HealthStatus::Degraded;
    }
    HealthStatus::Healthy
}
