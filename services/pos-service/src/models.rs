// /pos-dashboard/services/pos-service/src/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use validator::Validate;

// ========================= DOMAIN MODELS =========================

/// Model Category dari database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Category dengan jumlah produk untuk halaman list
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    pub product_count: i64,
}

/// Model Product dari database, price dalam satuan rupiah terkecil
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Referensi singkat category yang ikut di response product
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// Product dengan category untuk response list
#[derive(Debug, Clone, Serialize)]
pub struct ProductWithCategory {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub category: CategoryRef,
}

/// Status order, linear: AWAITING_PAYMENT -> PROCESSING -> DONE
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    AwaitingPayment,
    Processing,
    Done,
}

impl OrderStatus {
    /// Convert dari string query parameter
    pub fn parse(status: &str) -> Option<Self> {
        match status.trim().to_uppercase().as_str() {
            "AWAITING_PAYMENT" => Some(OrderStatus::AwaitingPayment),
            "PROCESSING" => Some(OrderStatus::Processing),
            "DONE" => Some(OrderStatus::Done),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::AwaitingPayment => "AWAITING_PAYMENT",
            OrderStatus::Processing => "PROCESSING",
            OrderStatus::Done => "DONE",
        }
    }
}

/// Filter status untuk list orders, "ALL" berarti tanpa filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatusFilter {
    #[default]
    All,
    Only(OrderStatus),
}

impl OrderStatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("ALL") {
            return Some(OrderStatusFilter::All);
        }
        OrderStatus::parse(value).map(OrderStatusFilter::Only)
    }

    pub fn status(&self) -> Option<OrderStatus> {
        match self {
            OrderStatusFilter::All => None,
            OrderStatusFilter::Only(status) => Some(*status),
        }
    }
}

/// Model Order dari database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub status: OrderStatus,
    pub subtotal: i64,
    pub tax: i64,
    pub grand_total: i64,
    pub external_transaction_id: Option<String>,
    pub payment_method_id: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Model OrderItem, price adalah snapshot harga product saat order dibuat
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub price: i64,
    pub quantity: i32,
}

/// Ringkasan order untuk halaman list
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderSummary {
    pub id: Uuid,
    pub grand_total: i64,
    pub status: OrderStatus,
    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
}

/// Agregat penjualan untuk dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalesReport {
    pub total_revenue: i64,
    pub total_ongoing_orders: i64,
    pub total_completed_orders: i64,
}

// ========================= REQUEST DTOs =========================

/// Request untuk membuat category
#[derive(Debug, Deserialize, Validate)]
pub struct CategoryRequest {
    #[validate(length(min = 3, max = 50, message = "Nama category 3-50 karakter"))]
    pub name: String,
}

/// Request untuk membuat product baru
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 3, max = 50, message = "Nama product 3-50 karakter"))]
    pub name: String,

    #[validate(range(min = 1000, max = 1_000_000_000, message = "Harga 1000 - 1.000.000.000"))]
    pub price: i64,

    pub category_id: Uuid,

    #[validate(url(message = "Image URL harus berupa URL yang valid"))]
    pub image_url: String,
}

/// Request untuk update product, image_url lama dipakai kalau tidak dikirim
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 3, max = 50, message = "Nama product 3-50 karakter"))]
    pub name: String,

    #[validate(range(min = 1000, max = 1_000_000_000, message = "Harga 1000 - 1.000.000.000"))]
    pub price: i64,

    pub category_id: Uuid,

    #[validate(url(message = "Image URL harus berupa URL yang valid"))]
    pub image_url: Option<String>,
}

/// Satu baris item di request create order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct OrderItemInput {
    pub product_id: Uuid,

    #[validate(range(min = 1, message = "Quantity minimal 1"))]
    pub quantity: i32,
}

/// Request untuk membuat order baru
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "Order harus memiliki minimal satu item"), nested)]
    pub order_items: Vec<OrderItemInput>,
}

/// Query parameters untuk list orders
#[derive(Debug, Default, Deserialize)]
pub struct OrderQueryParams {
    pub status: Option<String>,
}

// ========================= RESPONSE DTOs =========================

/// Hasil create order: order, item yang tersimpan dan payload QR
#[derive(Debug, Clone, Serialize)]
pub struct CreatedOrder {
    pub order: Order,
    pub order_items: Vec<OrderItem>,
    pub qr_string: String,
}

/// Hasil check status pembayaran order
#[derive(Debug, Clone, Serialize)]
pub struct OrderPaymentStatus {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub paid: bool,
    pub paid_at: Option<DateTime<Utc>>,
    pub payment_request: Option<PaymentRequest>,
}

/// Signed upload URL untuk gambar product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedUploadUrl {
    pub signed_url: String,
    pub token: String,
    pub path: String,
    pub public_url: String,
}

/// Standard success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

/// Standard error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error_code: Option<String>,
    pub details: Option<serde_json::Value>,
}

// ========================= PAYMENT GATEWAY DTOs =========================

/// Request body Xendit untuk payment request QRIS
#[derive(Debug, Clone, Serialize)]
pub struct XenditPaymentRequestBody {
    pub reference_id: String,
    pub amount: i64,
    pub currency: String,
    pub payment_method: XenditPaymentMethodParams,
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct XenditPaymentMethodParams {
    #[serde(rename = "type")]
    pub method_type: String,
    pub reusability: String,
    pub qr_code: XenditQrCodeParams,
}

#[derive(Debug, Clone, Serialize)]
pub struct XenditQrCodeParams {
    pub channel_code: String,
}

/// Snapshot payment request dari Xendit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub id: String,
    pub reference_id: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: String,
    pub payment_method: PaymentMethodInfo,
    pub created: Option<String>,
    pub updated: Option<String>,
}

impl PaymentRequest {
    /// Payload QRIS yang bisa di-scan, kalau gateway mengembalikannya
    pub fn qr_string(&self) -> Option<&str> {
        self.payment_method
            .qr_code
            .as_ref()
            .and_then(|qr| qr.channel_properties.as_ref())
            .and_then(|props| props.qr_string.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethodInfo {
    pub id: String,
    #[serde(rename = "type")]
    pub method_type: Option<String>,
    pub status: Option<String>,
    pub qr_code: Option<QrCodeInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCodeInfo {
    pub channel_code: Option<String>,
    pub channel_properties: Option<QrChannelProperties>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrChannelProperties {
    pub qr_string: Option<String>,
    pub expires_at: Option<String>,
}

/// Xendit webhook payload (event payment.*)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct XenditWebhookPayload {
    pub event: String,
    pub business_id: Option<String>,
    pub created: Option<String>,
    pub data: XenditWebhookData,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct XenditWebhookData {
    pub id: Option<String>,
    pub payment_request_id: Option<String>,
    pub reference_id: String,
    pub status: String,
    pub amount: Option<i64>,
}

/// Event webhook yang menandakan pembayaran berhasil
pub const PAYMENT_SUCCEEDED_EVENT: &str = "payment.succeeded";
