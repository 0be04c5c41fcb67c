// /pos-dashboard/services/pos-service/src/middleware/security.rs

use axum::{
    extract::{Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use crate::AppState;

/// Security headers untuk semua response
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();

    let mut response = next.run(req).await;
    apply_security_headers(response.headers_mut(), &path, state.config.is_production());

    response
}

fn apply_security_headers(headers: &mut HeaderMap, path: &str, production: bool) {
    headers.insert("X-Content-Type-Options", HeaderValue::from_static("nosniff"));
    headers.insert("X-Frame-Options", HeaderValue::from_static("DENY"));
    headers.insert("Referrer-Policy", HeaderValue::from_static("strict-origin-when-cross-origin"));
    headers.insert(
        "Permissions-Policy",
        HeaderValue::from_static("geolocation=(), microphone=(), camera=()"),
    );
    headers.insert(
        "Content-Security-Policy",
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none';"),
    );

    if production {
        headers.insert(
            "Strict-Transport-Security",
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    // data order dan laporan penjualan jangan di-cache
    if path.starts_with("/api/orders") {
        headers.insert(
            "Cache-Control",
            HeaderValue::from_static("no-store, no-cache, must-revalidate, private"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_routes_not_cached() {
        let mut headers = HeaderMap::new();
        apply_security_headers(&mut headers, "/api/orders/sales-report", false);

        assert_eq!(headers["X-Frame-Options"], "DENY");
        assert!(headers.contains_key("Cache-Control"));
        assert!(!headers.contains_key("Strict-Transport-Security"));
    }

    #[test]
    fn test_hsts_only_in_production() {
        let mut headers = HeaderMap::new();
        apply_security_headers(&mut headers, "/api/products", true);

        assert!(headers.contains_key("Strict-Transport-Security"));
        assert!(!headers.contains_key("Cache-Control"));
    }
}
