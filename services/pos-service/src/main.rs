// /pos-dashboard/services/pos-service/src/main.rs

mod models;
mod api;
mod core;
mod repository;
mod middleware;
mod utils;

use axum::{
    Router,
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::{
    trace::TraceLayer,
    timeout::TimeoutLayer,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tracing::info;
use crate::{
    api::routes,
    core::services::*,
    repository::Repository,
    middleware::auth::{auth_middleware, TokenVerifier},
    utils::config::AppConfig,
};

#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<Repository>,
    pub order_service: Arc<OrderService>,
    pub xendit_client: Arc<XenditClient>,
    pub storage_client: Arc<StorageClient>,
    pub auth: Arc<TokenVerifier>,
    pub config: Arc<AppConfig>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    utils::logger::init_logger();

    let config = Arc::new(AppConfig::from_env()?);

    // Setup database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout)
        .connect(&config.database.url)
        .await?;

    sqlx::query("SELECT 1").fetch_one(&pool).await?;
    info!("✅ Database berhasil terkoneksi");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("✅ Database migrations applied");

    // Initialize repository layer
    let repository = Arc::new(Repository::new(pool));

    // External clients
    let xendit_client = Arc::new(XenditClient::new(&config.xendit)?);
    let storage_client = Arc::new(StorageClient::new(&config.storage)?);

    let order_service = Arc::new(OrderService::new(
        repository.clone(),
        xendit_client.clone(),
    ));

    let app_state = AppState {
        repository,
        order_service,
        xendit_client,
        storage_client,
        auth: Arc::new(TokenVerifier::new(&config.jwt_secret)),
        config: config.clone(),
    };

    let cors = utils::cors::create_cors_layer(&config.environment);

    let app = Router::new()
        .merge(routes::create_routes())
        .with_state(app_state.clone())
        // Auth middleware (paling dalam)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware
        ))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::security::security_headers_middleware
        ))
        .layer(
            ServiceBuilder::new()
                // Request tracing (paling luar)
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(cors)
        );

    let bind_address = format!("0.0.0.0:{}", config.port);

    utils::banner::print_startup_banner(&bind_address, &config.environment);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("🚀 POS Service berjalan di {}", bind_address);

    axum::serve(listener, app)
        .await
        .map_err(|e| e.into())
}
