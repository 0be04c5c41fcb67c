// /pos-dashboard/services/pos-service/src/api/handlers.rs

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    core::order::PaymentConfirmation,
    models::*,
    utils::{
        error::{AppError, AppResult},
        health::{self, HealthCheckResult, HealthStatus},
        validator as utils_validator,
    },
    AppState,
};

const CALLBACK_TOKEN_HEADER: &str = "x-callback-token";

// ========================= HEALTH =========================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthCheckResult>) {
    let result = health::health_check(&state.repository).await;
    let status = match result.status {
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        _ => StatusCode::OK,
    };
    (status, Json(result))
}

// ========================= CATEGORY HANDLERS =========================

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<CategoryWithCount>>>> {
    let categories = state.repository.category().list_with_counts().await?;

    Ok(Json(ApiResponse::success("Categories berhasil diambil", categories)))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Category>>)> {
    payload.validate()?;
    let name = utils_validator::validate_string_length(&payload.name, "Nama category", 3, 50)?;

    let category = state.repository.category().create(&name).await?;
    tracing::info!("Category created: {} ({})", category.name, category.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Category berhasil dibuat", category)),
    ))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    payload.validate()?;
    let name = utils_validator::validate_string_length(&payload.name, "Nama category", 3, 50)?;

    let category = state.repository.category().update(category_id, &name).await?;
    tracing::info!("Category updated: {}", category_id);

    Ok(Json(ApiResponse::success("Category berhasil diupdate", category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Uuid>>> {
    state.repository.category().delete(category_id).await?;
    tracing::info!("Category deleted: {}", category_id);

    Ok(Json(ApiResponse::success("Category berhasil dihapus", category_id)))
}

// ========================= PRODUCT HANDLERS =========================

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<ProductWithCategory>>>> {
    let products = state.repository.product().list_with_category().await?;

    Ok(Json(ApiResponse::success("Products berhasil diambil", products)))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Product>>)> {
    payload.validate()?;
    let name = utils_validator::validate_string_length(&payload.name, "Nama product", 3, 50)?;
    ensure_category_exists(&state, payload.category_id).await?;

    let product = state.repository
        .product()
        .create(&name, payload.price, payload.category_id, &payload.image_url)
        .await?;
    tracing::info!("Product created: {} ({})", product.name, product.id);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Product berhasil dibuat", product)),
    ))
}

/// PUT /api/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    payload.validate()?;
    let name = utils_validator::validate_string_length(&payload.name, "Nama product", 3, 50)?;
    ensure_category_exists(&state, payload.category_id).await?;

    let product = state.repository
        .product()
        .update(
            product_id,
            &name,
            payload.price,
            payload.category_id,
            payload.image_url.as_deref(),
        )
        .await?;
    tracing::info!("Product updated: {}", product_id);

    Ok(Json(ApiResponse::success("Product berhasil diupdate", product)))
}

/// DELETE /api/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Uuid>>> {
    state.repository.product().delete(product_id).await?;
    tracing::info!("Product deleted: {}", product_id);

    Ok(Json(ApiResponse::success("Product berhasil dihapus", product_id)))
}

/// POST /api/products/image-upload-url
pub async fn create_product_image_upload_url(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SignedUploadUrl>>> {
    let signed = state.storage_client.create_product_image_upload_url().await?;
    tracing::debug!("Signed upload URL issued for {}", signed.path);

    Ok(Json(ApiResponse::success("Signed upload URL berhasil dibuat", signed)))
}

async fn ensure_category_exists(state: &AppState, category_id: Uuid) -> AppResult<()> {
    if !state.repository.category().exists(category_id).await? {
        return Err(AppError::NotFound("Category tidak ditemukan".to_string()));
    }
    Ok(())
}

// ========================= ORDER HANDLERS =========================

/// GET /api/orders?status=
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<OrderQueryParams>,
) -> AppResult<Json<ApiResponse<Vec<OrderSummary>>>> {
    let filter = utils_validator::parse_status_filter(params.status.as_deref())?;
    let orders = state.order_service.get_orders(filter).await?;

    Ok(Json(ApiResponse::success("Orders berhasil diambil", orders)))
}

/// POST /api/orders
pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedOrder>>)> {
    payload.validate()?;

    let created = state.order_service
        .create_order(&payload.order_items)
        .await
        .map_err(|e| {
            tracing::warn!("Create order gagal: {}", e);
            e
        })?;

    tracing::info!(
        "New order created: {} grand_total={} items={}",
        created.order.id,
        created.order.grand_total,
        created.order_items.len()
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Order berhasil dibuat", created)),
    ))
}

/// POST /api/orders/{id}/payment-request
pub async fn retry_payment_request(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CreatedOrder>>> {
    let created = state.order_service.retry_payment_request(order_id).await?;
    tracing::info!("Payment request dibuat ulang untuk order {}", order_id);

    Ok(Json(ApiResponse::success("Payment request berhasil dibuat", created)))
}

/// POST /api/orders/{id}/simulate-payment
pub async fn simulate_payment(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Uuid>>> {
    state.order_service.simulate_payment(order_id).await?;
    tracing::info!("Payment simulation requested for order {}", order_id);

    Ok(Json(ApiResponse::success("Simulasi pembayaran dikirim", order_id)))
}

/// GET /api/orders/{id}/status
pub async fn check_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderPaymentStatus>>> {
    let status = state.order_service.check_order_status(order_id).await?;

    let message = if status.paid {
        "Order sudah dibayar"
    } else {
        "Order belum dibayar"
    };

    Ok(Json(ApiResponse::success(message, status)))
}

/// POST /api/orders/{id}/finish
pub async fn finish_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let order = state.order_service.finish_order(order_id).await?;
    tracing::info!("Order {} selesai", order_id);

    Ok(Json(ApiResponse::success("Order berhasil diselesaikan", order)))
}

/// GET /api/orders/sales-report
pub async fn get_sales_report(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SalesReport>>> {
    let report = state.order_service.get_sales_report().await?;

    Ok(Json(ApiResponse::success("Sales report berhasil diambil", report)))
}

// ========================= WEBHOOK =========================

/// Handler untuk Xendit webhook
/// POST /api/webhook/xendit
pub async fn handle_xendit_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<XenditWebhookPayload>,
) -> AppResult<Json<serde_json::Value>> {
    let token = headers
        .get(CALLBACK_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Webhook received without callback token");
            AppError::Unauthorized("Callback token tidak ada".to_string())
        })?;

    if !state.xendit_client.verify_callback_token(token) {
        tracing::warn!("Webhook rejected: invalid callback token");
        return Err(AppError::Unauthorized("Callback token tidak valid".to_string()));
    }

    tracing::info!(
        "Processing webhook {} for reference {}",
        payload.event,
        payload.data.reference_id
    );

    let (result, order_id) = match state.order_service.confirm_payment(&payload).await? {
        PaymentConfirmation::Applied(order) => {
            tracing::info!("Order {} dibayar, status {}", order.id, order.status.as_str());
            ("applied", Some(order.id))
        }
        PaymentConfirmation::AlreadyApplied(order) => {
            tracing::debug!("Webhook duplikat untuk order {}", order.id);
            ("already_applied", Some(order.id))
        }
        PaymentConfirmation::Ignored(reason) => {
            tracing::debug!("Webhook diabaikan: {}", reason);
            ("ignored", None)
        }
    };

    Ok(Json(serde_json::json!({
        "success": true,
        "result": result,
        "order_id": order_id,
        "processed_at": chrono::Utc::now()
    })))
}
