// /pos-dashboard/services/pos-service/src/repository/mod.rs

pub mod category;
pub mod order;
pub mod product;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    core::order::{OrderDraft, OrderStore},
    models::*,
    utils::error::AppResult,
};

/// Main repository struct yang menggabungkan semua repositories
pub struct Repository {
    pub pool: PgPool,
    category_repo: Arc<category::CategoryRepository>,
    product_repo: Arc<product::ProductRepository>,
    order_repo: Arc<order::OrderRepository>,
}

impl Repository {
    pub fn new(pool: PgPool) -> Self {
        let category_repo = Arc::new(category::CategoryRepository::new(pool.clone()));
        let product_repo = Arc::new(product::ProductRepository::new(pool.clone()));
        let order_repo = Arc::new(order::OrderRepository::new(pool.clone()));

        Self {
            pool,
            category_repo,
            product_repo,
            order_repo,
        }
    }

    pub fn category(&self) -> &category::CategoryRepository {
        &self.category_repo
    }

    pub fn product(&self) -> &product::ProductRepository {
        &self.product_repo
    }

    pub fn order(&self) -> &order::OrderRepository {
        &self.order_repo
    }

    /// Expose pool untuk health check
    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl OrderStore for Repository {
    async fn find_products_by_ids(&self, ids: &[Uuid]) -> AppResult<Vec<Product>> {
        self.product().find_by_ids(ids).await
    }

    async fn insert_order_with_items(&self, draft: &OrderDraft) -> AppResult<(Order, Vec<OrderItem>)> {
        self.order().create_with_items(draft).await
    }

    async fn attach_payment(
        &self,
        order_id: Uuid,
        external_transaction_id: &str,
        payment_method_id: &str,
    ) -> AppResult<Option<Order>> {
        self.order()
            .attach_payment(order_id, external_transaction_id, payment_method_id)
            .await
    }

    async fn find_order(&self, order_id: Uuid) -> AppResult<Option<Order>> {
        self.order().find_by_id(order_id).await
    }

    async fn find_order_items(&self, order_id: Uuid) -> AppResult<Vec<OrderItem>> {
        self.order().find_items(order_id).await
    }

    async fn mark_paid(&self, order_id: Uuid, paid_at: DateTime<Utc>) -> AppResult<Option<Order>> {
        self.order().mark_paid(order_id, paid_at).await
    }

    async fn transition_paid_order(
        &self,
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    ) -> AppResult<Option<Order>> {
        self.order().transition_paid(order_id, from, to).await
    }

    async fn list_orders(&self, status: Option<OrderStatus>) -> AppResult<Vec<OrderSummary>> {
        self.order().list_summaries(status).await
    }

    async fn sales_report(&self) -> AppResult<SalesReport> {
        self.order().sales_report().await
    }
}
