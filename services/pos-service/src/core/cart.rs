// /pos-dashboard/services/pos-service/src/core/cart.rs

use serde::Serialize;
use uuid::Uuid;
use crate::core::order::OrderTotals;
use crate::utils::error::AppResult;
use crate::models::{OrderItemInput, Product};

/// Satu baris di cart kasir
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItem {
    pub product_id: Uuid,
    pub name: String,
    pub price: i64,
    pub image_url: String,
    pub quantity: i32,
}

/// Cart milik satu sesi kasir, tidak dibagi antar sesi
#[derive(Debug, Clone, Default, Serialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tambah product, quantity naik satu kalau sudah ada di cart
    pub fn add_product(&mut self, product: &Product) {
        match self.items.iter_mut().find(|item| item.product_id == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem {
                product_id: product.id,
                name: product.name.clone(),
                price: product.price,
                image_url: product.image_url.clone(),
                quantity: 1,
            }),
        }
    }

    /// Set quantity item, 0 atau kurang menghapus item dari cart
    pub fn set_quantity(&mut self, product_id: Uuid, quantity: i32) -> bool {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        match self.items.iter_mut().find(|item| item.product_id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove_item(&mut self, product_id: Uuid) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> i32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Perkiraan total dengan harga yang tersimpan di cart
    pub fn totals(&self) -> AppResult<OrderTotals> {
        OrderTotals::from_lines(self.items.iter().map(|item| (item.price, item.quantity)))
    }

    /// Item cart dalam bentuk input create order
    pub fn order_items(&self) -> Vec<OrderItemInput> {
        self.items
            .iter()
            .map(|item| OrderItemInput {
                product_id: item.product_id,
                quantity: item.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::tests::product;

    #[test]
    fn test_add_same_product_increments_quantity() {
        let kopi = product(18_000);
        let mut cart = Cart::new();

        cart.add_product(&kopi);
        cart.add_product(&kopi);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.totals().unwrap().grand_total, 39_600);
    }

    #[test]
    fn test_set_quantity_zero_removes_item() {
        let kopi = product(18_000);
        let teh = product(5_000);
        let mut cart = Cart::new();
        cart.add_product(&kopi);
        cart.add_product(&teh);

        assert!(cart.set_quantity(kopi.id, 3));
        assert_eq!(cart.total_quantity(), 4);

        assert!(cart.set_quantity(teh.id, 0));
        assert_eq!(cart.items().len(), 1);
        assert!(!cart.set_quantity(teh.id, 2));
    }

    #[test]
    fn test_quantity_saturates_and_totals_report_overflow() {
        let mahal = product(i64::MAX / 2);
        let mut cart = Cart::new();
        cart.add_product(&mahal);
        cart.set_quantity(mahal.id, i32::MAX);
        cart.add_product(&mahal);

        assert_eq!(cart.total_quantity(), i32::MAX);
        assert!(matches!(
            cart.totals(),
            Err(crate::utils::error::AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_order_items_and_clear() {
        let kopi = product(18_000);
        let mut cart = Cart::new();
        cart.add_product(&kopi);

        assert_eq!(
            cart.order_items(),
            vec![OrderItemInput { product_id: kopi.id, quantity: 1 }]
        );

        cart.clear();
        assert!(cart.is_empty());
        assert!(!cart.remove_item(kopi.id));
    }
}
