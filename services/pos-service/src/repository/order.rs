// /pos-dashboard/services/pos-service/src/repository/order.rs

use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::{
    core::order::OrderDraft,
    models::*,
    utils::error::{AppError, AppResult},
};

const ORDER_COLUMNS: &str = "id, status, subtotal, tax, grand_total, external_transaction_id, \
                             payment_method_id, paid_at, created_at, updated_at";

/// Repository untuk order dan order item operations
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert order beserta semua item dalam satu transaction
    pub async fn create_with_items(&self, draft: &OrderDraft) -> AppResult<(Order, Vec<OrderItem>)> {
        let mut tx = self.pool.begin().await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (id, status, subtotal, tax, grand_total)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(OrderStatus::AwaitingPayment)
        .bind(draft.totals.subtotal)
        .bind(draft.totals.tax)
        .bind(draft.totals.grand_total)
        .fetch_one(&mut *tx)
        .await?;

        let mut items = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let item = sqlx::query_as::<_, OrderItem>(
                r#"
                INSERT INTO order_items (id, order_id, product_id, price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, order_id, product_id, price, quantity
                "#
            )
            .bind(Uuid::new_v4())
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.price)
            .bind(line.quantity)
            .fetch_one(&mut *tx)
            .await?;

            items.push(item);
        }

        tx.commit().await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::debug!("Order {} tersimpan dengan {} item", order.id, items.len());

        Ok((order, items))
    }

    pub async fn find_by_id(&self, order_id: Uuid) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {} FROM orders WHERE id = $1",
            ORDER_COLUMNS
        ))
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(order)
    }

    pub async fn find_items(&self, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, price, quantity
            FROM order_items
            WHERE order_id = $1
            "#
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(items)
    }

    /// Set external ids sekali saja, None kalau order sudah punya payment request
    pub async fn attach_payment(
        &self,
        order_id: Uuid,
        external_transaction_id: &str,
        payment_method_id: &str,
    ) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET external_transaction_id = $2,
                payment_method_id = $3,
                updated_at = NOW()
            WHERE id = $1
              AND external_transaction_id IS NULL
              AND payment_method_id IS NULL
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(order_id)
        .bind(external_transaction_id)
        .bind(payment_method_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(order)
    }

    /// Tandai order dibayar, hanya dari AWAITING_PAYMENT yang belum punya paid_at
    pub async fn mark_paid(&self, order_id: Uuid, paid_at: DateTime<Utc>) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $2, paid_at = $3, updated_at = NOW()
            WHERE id = $1
              AND status = $4
              AND paid_at IS NULL
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(order_id)
        .bind(OrderStatus::Processing)
        .bind(paid_at)
        .bind(OrderStatus::AwaitingPayment)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(order)
    }

    /// Compare-and-set status untuk order yang sudah dibayar
    pub async fn transition_paid(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $3, updated_at = NOW()
            WHERE id = $1
              AND status = $2
              AND paid_at IS NOT NULL
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(order_id)
        .bind(from)
        .bind(to)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(order)
    }

    /// List ringkasan order, terbaru dulu, optional filter status
    pub async fn list_summaries(&self, status: Option<OrderStatus>) -> AppResult<Vec<OrderSummary>> {
        let orders = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT o.id, o.grand_total, o.status, o.paid_at, o.created_at,
                   COUNT(oi.id) AS item_count
            FROM orders o
            LEFT JOIN order_items oi ON oi.order_id = o.id
            WHERE ($1::order_status IS NULL OR o.status = $1)
            GROUP BY o.id
            ORDER BY o.created_at DESC
            "#
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(orders)
    }

    /// Agregat untuk dashboard penjualan
    pub async fn sales_report(&self) -> AppResult<SalesReport> {
        let row = sqlx::query(
            r#"
            SELECT
                COALESCE(SUM(grand_total) FILTER (WHERE paid_at IS NOT NULL), 0)::BIGINT AS total_revenue,
                COUNT(*) FILTER (WHERE status <> 'DONE') AS total_ongoing_orders,
                COUNT(*) FILTER (WHERE status = 'DONE') AS total_completed_orders
            FROM orders
            "#
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(SalesReport {
            total_revenue: row.try_get("total_revenue")?,
            total_ongoing_orders: row.try_get("total_ongoing_orders")?,
            total_completed_orders: row.try_get("total_completed_orders")?,
        })
    }
}
