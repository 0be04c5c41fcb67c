// /pos-dashboard/services/pos-service/src/api/routes.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use crate::AppState;
use super::handlers;

/// Create semua routes untuk pos service
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))

        // Catalog
        .route("/api/categories", get(handlers::list_categories).post(handlers::create_category))
        .route(
            "/api/categories/{id}",
            put(handlers::update_category).delete(handlers::delete_category),
        )
        .route("/api/products", get(handlers::list_products).post(handlers::create_product))
        .route(
            "/api/products/image-upload-url",
            post(handlers::create_product_image_upload_url),
        )
        .route(
            "/api/products/{id}",
            put(handlers::update_product).delete(handlers::delete_product),
        )

        // Orders
        .route("/api/orders", get(handlers::list_orders).post(handlers::create_order))
        .route("/api/orders/sales-report", get(handlers::get_sales_report))
        .route("/api/orders/{id}/payment-request", post(handlers::retry_payment_request))
        .route("/api/orders/{id}/simulate-payment", post(handlers::simulate_payment))
        .route("/api/orders/{id}/status", get(handlers::check_order_status))
        .route("/api/orders/{id}/finish", post(handlers::finish_order))

        // Webhook endpoint (public, verified lewat callback token)
        .route("/api/webhook/xendit", post(handlers::handle_xendit_webhook))
}
