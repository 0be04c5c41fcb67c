// /pos-dashboard/services/pos-service/src/utils/cors.rs

use tower_http::cors::CorsLayer;
use axum::http::{header, Method, HeaderValue};
use std::env;

/// Setup CORS layer untuk dashboard, production hanya menerima origin https
pub fn create_cors_layer(environment: &str) -> CorsLayer {
    let production = environment == "production";
    let origins = parse_allowed_origins(production);

    let layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(allowed_methods())
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    if production {
        layer
            .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
            .max_age(std::time::Duration::from_secs(86400))
    } else {
        layer.max_age(std::time::Duration::from_secs(3600))
    }
}

/// Parse origins dari ALLOWED_ORIGINS (comma separated)
fn parse_allowed_origins(production: bool) -> Vec<HeaderValue> {
    let default = if production {
        "https://pos.example.com"
    } else {
        "http://localhost:3000"
    };
    let origins_str = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| default.to_string());

    origins_str
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .filter(|origin| !production || origin.starts_with("https://"))
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(header) => {
                tracing::debug!("CORS origin registered: {}", origin);
                Some(header)
            }
            Err(e) => {
                tracing::warn!("Invalid origin format '{}': {}", origin, e);
                None
            }
        })
        .collect()
}

fn allowed_methods() -> Vec<Method> {
    vec![
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_parse_origins() {
        env::set_var("ALLOWED_ORIGINS", "http://localhost:3000, https://pos.example.com");
        assert_eq!(parse_allowed_origins(false).len(), 2);
        env::remove_var("ALLOWED_ORIGINS");
    }

    #[test]
    #[serial]
    fn test_production_keeps_https_only() {
        env::set_var("ALLOWED_ORIGINS", "http://localhost:3000,https://pos.example.com");
        let origins = parse_allowed_origins(true);
        assert_eq!(origins, vec![HeaderValue::from_static("https://pos.example.com")]);
        env::remove_var("ALLOWED_ORIGINS");
    }
}
