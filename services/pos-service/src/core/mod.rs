// /pos-dashboard/services/pos-service/src/core/mod.rs

// cart dipegang sesi kasir di sisi caller, belum ada route HTTP untuk cart
#[allow(dead_code)]
pub mod cart;
pub mod order;
pub mod storage;
pub mod xendit;

// Re-export untuk kemudahan akses
pub mod services {
    pub use super::order::OrderService;
    pub use super::storage::StorageClient;
    pub use super::xendit::XenditClient;
}
