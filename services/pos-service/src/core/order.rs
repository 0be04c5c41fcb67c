// /pos-dashboard/services/pos-service/src/core/order.rs

use std::collections::HashMap;
use std::sync::Arc;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::{
    core::cart::Cart,
    models::*,
    utils::error::{AppError, AppResult},
};

/// Tarif pajak tetap dalam persen
pub const TAX_RATE_PERCENT: i64 = 10;

/// Subtotal, pajak dan grand total sebuah order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrderTotals {
    pub subtotal: i64,
    pub tax: i64,
    pub grand_total: i64,
}

impl OrderTotals {
    /// Hitung total dari pasangan (price, quantity), pajak dibulatkan half-up
    pub fn from_lines<I>(lines: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = (i64, i32)>,
    {
        let overflow = || AppError::ValidationError("Total order melebihi batas".to_string());

        let subtotal = lines.into_iter().try_fold(0_i64, |acc, (price, quantity)| {
            price
                .checked_mul(i64::from(quantity))
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(overflow)
        })?;
        let tax = subtotal
            .checked_mul(TAX_RATE_PERCENT)
            .and_then(|scaled| scaled.checked_add(50))
            .map(|scaled| scaled / 100)
            .ok_or_else(overflow)?;
        let grand_total = subtotal.checked_add(tax).ok_or_else(overflow)?;

        Ok(Self {
            subtotal,
            tax,
            grand_total,
        })
    }
}

/// Satu baris order yang harganya sudah di-snapshot dari product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: Uuid,
    pub price: i64,
    pub quantity: i32,
}

/// Order yang siap disimpan bersama item-itemnya
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub totals: OrderTotals,
    pub lines: Vec<OrderLine>,
}

/// Hasil pemrosesan webhook pembayaran
#[derive(Debug, Clone)]
pub enum PaymentConfirmation {
    Applied(Order),
    AlreadyApplied(Order),
    Ignored(String),
}

/// Akses persistence yang dibutuhkan order flow
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn find_products_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Product>>;

    /// Simpan order (AWAITING_PAYMENT) dan semua item dalam satu transaksi
    async fn insert_order_with_items(&self, draft: &OrderDraft) -> AppResult<(Order, Vec<OrderItem>)>;

    /// Set external ids hanya kalau keduanya masih kosong, None kalau sudah terisi
    async fn attach_payment(
        &self,
        order_id: Uuid,
        external_transaction_id: &str,
        payment_method_id: &str,
    ) -> AppResult<Option<Order>>;

    async fn find_order(&self, order_id: Uuid) -> AppResult<Option<Order>>;

    async fn find_order_items(&self, order_id: Uuid) -> AppResult<Vec<OrderItem>>;

    /// AWAITING_PAYMENT + paid_at kosong -> PROCESSING + paid_at, None kalau kondisi tidak terpenuhi
    async fn mark_paid(&self, order_id: Uuid, paid_at: DateTime<Utc>) -> AppResult<Option<Order>>;

    /// Update status kalau status sekarang masih `from` dan paid_at sudah terisi
    async fn transition_paid_order(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>>;

    async fn list_orders(&self, status: Option<OrderStatus>) -> AppResult<Vec<OrderSummary>>;

    async fn sales_report(&self) -> AppResult<SalesReport>;
}

/// Kontrak payment gateway yang dipakai order flow
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_qris_payment_request(&self, amount: i64, reference_id: &str) -> AppResult<PaymentRequest>;

    async fn simulate_payment(&self, payment_method_id: &str, amount: i64) -> AppResult<()>;

    async fn get_payment_request(&self, payment_request_id: &str) -> AppResult<PaymentRequest>;
}

/// Service untuk order, pembayaran QRIS dan laporan penjualan
pub struct OrderService {
    store: Arc<dyn OrderStore>,
    gateway: Arc<dyn PaymentGateway>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { store, gateway }
    }

    /// Create order, simpan item dan buat payment request QRIS
    pub async fn create_order(&self, items: &[OrderItemInput]) -> AppResult<CreatedOrder> {
        let requested = merge_items(items)?;

        let ids: Vec<Uuid> = requested.iter().map(|(id, _)| *id).collect();
        let products = self.store.find_products_by_ids(&ids).await?;
        let prices: HashMap<Uuid, i64> = products.iter().map(|p| (p.id, p.price)).collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !prices.contains_key(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::NotFound(format!(
                "Product tidak ditemukan: {}",
                missing.join(", ")
            )));
        }

        let lines: Vec<OrderLine> = requested
            .iter()
            .map(|(product_id, quantity)| OrderLine {
                product_id: *product_id,
                price: prices[product_id],
                quantity: *quantity,
            })
            .collect();
        let totals = OrderTotals::from_lines(lines.iter().map(|l| (l.price, l.quantity)))?;

        let (order, order_items) = self.store
            .insert_order_with_items(&OrderDraft { totals, lines })
            .await?;

        // gagal di sini = order tetap AWAITING_PAYMENT tanpa external id
        let (order, qr_string) = self.request_payment(order).await?;

        Ok(CreatedOrder {
            order,
            order_items,
            qr_string,
        })
    }

    /// Checkout cart milik satu sesi, cart dikosongkan hanya kalau order berhasil
    #[allow(dead_code)]
    pub async fn checkout(&self, cart: &mut Cart) -> AppResult<CreatedOrder> {
        let created = self.create_order(&cart.order_items()).await?;
        cart.clear();
        Ok(created)
    }

    /// Ulangi pembuatan payment request untuk order yang gagal di gateway
    pub async fn retry_payment_request(&self, order_id: Uuid) -> AppResult<CreatedOrder> {
        let order = self.get_order(order_id).await?;

        if order.status != OrderStatus::AwaitingPayment {
            return Err(AppError::InvalidState(format!(
                "Order dengan status {} tidak bisa membuat payment request",
                order.status.as_str()
            )));
        }
        if order.external_transaction_id.is_some() || order.payment_method_id.is_some() {
            return Err(AppError::InvalidState(
                "Order sudah memiliki payment request".to_string(),
            ));
        }

        let order_items = self.store.find_order_items(order_id).await?;
        let (order, qr_string) = self.request_payment(order).await?;

        Ok(CreatedOrder {
            order,
            order_items,
            qr_string,
        })
    }

    /// Simulasi pembayaran lewat gateway (demo/test mode)
    pub async fn simulate_payment(&self, order_id: Uuid) -> AppResult<()> {
        let order = self.get_order(order_id).await?;

        let payment_method_id = order.payment_method_id.as_deref().ok_or_else(|| {
            AppError::InvalidState("Order belum memiliki payment method".to_string())
        })?;

        self.gateway
            .simulate_payment(payment_method_id, order.grand_total)
            .await
    }

    /// Check status pembayaran, gateway hanya ditanya kalau order sudah dibayar
    pub async fn check_order_status(&self, order_id: Uuid) -> AppResult<OrderPaymentStatus> {
        let order = self.get_order(order_id).await?;

        if order.paid_at.is_none() {
            return Ok(OrderPaymentStatus {
                order_id: order.id,
                status: order.status,
                paid: false,
                paid_at: None,
                payment_request: None,
            });
        }

        let external_id = order.external_transaction_id.as_deref().ok_or_else(|| {
            AppError::InvalidState("Order tidak memiliki external transaction id".to_string())
        })?;
        let payment_request = self.gateway.get_payment_request(external_id).await?;

        Ok(OrderPaymentStatus {
            order_id: order.id,
            status: order.status,
            paid: true,
            paid_at: order.paid_at,
            payment_request: Some(payment_request),
        })
    }

    /// Selesaikan order yang sudah dibayar
    pub async fn finish_order(&self, order_id: Uuid) -> AppResult<Order> {
        let order = self.get_order(order_id).await?;

        if order.paid_at.is_none() {
            return Err(AppError::InvalidState("Order belum dibayar".to_string()));
        }
        if order.status == OrderStatus::Done {
            return Ok(order);
        }

        self.store
            .transition_paid_order(order.id, order.status, OrderStatus::Done)
            .await?
            .ok_or_else(|| {
                AppError::Conflict("Order berubah saat diproses, silakan coba lagi".to_string())
            })
    }

    /// Proses webhook pembayaran dari gateway
    pub async fn confirm_payment(&self, payload: &XenditWebhookPayload) -> AppResult<PaymentConfirmation> {
        if payload.event != PAYMENT_SUCCEEDED_EVENT {
            return Ok(PaymentConfirmation::Ignored(format!(
                "Event {} tidak diproses",
                payload.event
            )));
        }

        let order_id = Uuid::parse_str(&payload.data.reference_id).map_err(|_| {
            AppError::BadRequest(format!("reference_id {} tidak valid", payload.data.reference_id))
        })?;
        let order = self.get_order(order_id).await?;

        if let (Some(expected), Some(received)) = (
            order.external_transaction_id.as_deref(),
            payload.data.payment_request_id.as_deref(),
        ) {
            if expected != received {
                return Err(AppError::ValidationError(format!(
                    "Payment request {} bukan milik order {}",
                    received, order.id
                )));
            }
        }

        if order.paid_at.is_some() {
            return Ok(PaymentConfirmation::AlreadyApplied(order));
        }

        match self.store.mark_paid(order.id, Utc::now()).await? {
            Some(updated) => Ok(PaymentConfirmation::Applied(updated)),
            None => {
                // webhook lain sudah lebih dulu menandai order ini
                let current = self.get_order(order.id).await?;
                if current.paid_at.is_some() {
                    Ok(PaymentConfirmation::AlreadyApplied(current))
                } else {
                    Err(AppError::InvalidState(format!(
                        "Order dengan status {} tidak bisa ditandai dibayar",
                        current.status.as_str()
                    )))
                }
            }
        }
    }

    pub async fn get_orders(&self, filter: OrderStatusFilter) -> AppResult<Vec<OrderSummary>> {
        self.store.list_orders(filter.status()).await
    }

    pub async fn get_sales_report(&self) -> AppResult<SalesReport> {
        self.store.sales_report().await
    }

    async fn get_order(&self, order_id: Uuid) -> AppResult<Order> {
        self.store
            .find_order(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order tidak ditemukan".to_string()))
    }

    /// Buat payment request QRIS lalu simpan id-nya ke order
    async fn request_payment(&self, order: Order) -> AppResult<(Order, String)> {
        let payment_request = self.gateway
            .create_qris_payment_request(order.grand_total, &order.id.to_string())
            .await?;

        let qr_string = payment_request
            .qr_string()
            .ok_or_else(|| {
                AppError::ExternalService("Xendit response tidak memiliki qr_string".to_string())
            })?
            .to_string();

        let order = self.store
            .attach_payment(order.id, &payment_request.id, &payment_request.payment_method.id)
            .await?
            .ok_or_else(|| AppError::Conflict("Order sudah memiliki payment request".to_string()))?;

        Ok((order, qr_string))
    }
}

/// Validasi item dan gabungkan product id yang sama (quantity dijumlahkan)
fn merge_items(items: &[OrderItemInput]) -> AppResult<Vec<(Uuid, i32)>> {
    if items.is_empty() {
        return Err(AppError::ValidationError(
            "Order harus memiliki minimal satu item".to_string(),
        ));
    }

    let mut merged: Vec<(Uuid, i32)> = Vec::with_capacity(items.len());
    for item in items {
        if item.quantity < 1 {
            return Err(AppError::ValidationError(format!(
                "Quantity untuk product {} minimal 1",
                item.product_id
            )));
        }

        match merged.iter_mut().find(|(id, _)| *id == item.product_id) {
            Some((_, quantity)) => {
                *quantity = quantity.checked_add(item.quantity).ok_or_else(|| {
                    AppError::ValidationError("Quantity terlalu besar".to_string())
                })?;
            }
            None => merged.push((item.product_id, item.quantity)),
        }
    }

    Ok(merged)
}
