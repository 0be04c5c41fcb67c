// /pos-dashboard/services/pos-service/src/utils/config.rs

//! Konfigurasi service dari environment variables (`.env` di-load lewat dotenvy).
//!
//! Required: `DATABASE_URL`, `XENDIT_SECRET_KEY`, `XENDIT_CALLBACK_TOKEN`,
//! `SUPABASE_URL`, `SUPABASE_SERVICE_ROLE_KEY`, `JWT_SECRET`.

use std::env;
use std::time::Duration;
use thiserror::Error;

const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct XenditConfig {
    pub secret_key: String,
    pub base_url: String,
    pub callback_token: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub supabase_url: String,
    pub service_role_key: String,
    pub product_images_bucket: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub xendit: XenditConfig,
    pub storage: StorageConfig,
    pub jwt_secret: String,
    pub port: u16,
    pub environment: String,
}

impl AppConfig {
    /// Load semua konfigurasi dari environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = required("JWT_SECRET")?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::InvalidEnvVar(
                "JWT_SECRET".to_string(),
                format!("must be at least {} characters", MIN_JWT_SECRET_LENGTH),
            ));
        }

        let port = env::var("POS_SERVICE_PORT")
            .or_else(|_| env::var("SERVER_PORT"))
            .unwrap_or_else(|_| "3004".to_string());
        let port = port
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("POS_SERVICE_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            database: DatabaseConfig {
                url: required("DATABASE_URL")?,
                max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
                acquire_timeout: Duration::from_secs(parse_or("DATABASE_ACQUIRE_TIMEOUT_SECONDS", 3)?),
            },
            xendit: XenditConfig {
                secret_key: required("XENDIT_SECRET_KEY")?,
                base_url: env::var("XENDIT_BASE_URL")
                    .unwrap_or_else(|_| "https://api.xendit.co".to_string())
                    .trim_end_matches('/')
                    .to_string(),
                callback_token: required("XENDIT_CALLBACK_TOKEN")?,
                timeout: Duration::from_secs(parse_or("XENDIT_TIMEOUT_SECONDS", 30)?),
            },
            storage: StorageConfig {
                supabase_url: required("SUPABASE_URL")?.trim_end_matches('/').to_string(),
                service_role_key: required("SUPABASE_SERVICE_ROLE_KEY")?,
                product_images_bucket: env::var("PRODUCT_IMAGES_BUCKET")
                    .unwrap_or_else(|_| "product-images".to_string()),
            },
            jwt_secret,
            port,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .to_lowercase(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn required(key: &str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn parse_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_required_env() {
        env::set_var("DATABASE_URL", "postgres://localhost/pos");
        env::set_var("XENDIT_SECRET_KEY", "xnd_development_key");
        env::set_var("XENDIT_CALLBACK_TOKEN", "callback-token");
        env::set_var("SUPABASE_URL", "https://project.supabase.co/");
        env::set_var("SUPABASE_SERVICE_ROLE_KEY", "service-role");
        env::set_var("JWT_SECRET", "0123456789abcdef0123456789abcdef");
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        set_required_env();
        env::remove_var("POS_SERVICE_PORT");
        env::remove_var("SERVER_PORT");
        env::remove_var("XENDIT_BASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");

        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.port, 3004);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.xendit.base_url, "https://api.xendit.co");
        assert_eq!(config.storage.supabase_url, "https://project.supabase.co");
        assert_eq!(config.storage.product_images_bucket, "product-images");
    }

    #[test]
    #[serial]
    fn test_short_jwt_secret_rejected() {
        set_required_env();
        env::set_var("JWT_SECRET", "short");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(key, _)) if key == "JWT_SECRET"));
    }

    #[test]
    #[serial]
    fn test_missing_required_var() {
        set_required_env();
        env::remove_var("XENDIT_SECRET_KEY");

        let result = AppConfig::from_env();
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(key)) if key == "XENDIT_SECRET_KEY"));
    }

    #[test]
    #[serial]
    fn test_invalid_number_rejected() {
        set_required_env();
        env::set_var("DATABASE_MAX_CONNECTIONS", "many");

        let result = AppConfig::from_env();
        assert!(result.is_err());
        env::remove_var("DATABASE_MAX_CONNECTIONS");
    }
}
