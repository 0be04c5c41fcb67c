// /pos-dashboard/services/pos-service/src/utils/banner.rs

/// Print startup banner
pub fn print_startup_banner(bind_address: &str, environment: &str) {
    println!(r#"
╔══════════════════════════════════════════════════════════╗
║                    POS SERVICE v1.0.0                     ║
║               Catalog • Orders • QRIS Payment             ║
╚══════════════════════════════════════════════════════════╝
    "#);

    tracing::info!("🚀 POS Service starting at {} ({})", bind_address, environment);
    tracing::info!("📋 Available endpoints:");
    tracing::info!("  Public:");
    tracing::info!("    GET    /health                           - Health check");
    tracing::info!("    POST   /api/webhook/xendit               - Payment webhook");
    tracing::info!("  Catalog:");
    tracing::info!("    GET    /api/categories                   - List categories");
    tracing::info!("    POST   /api/categories                   - Create category");
    tracing::info!("    PUT    /api/categories/{{id}}              - Update category");
    tracing::info!("    DELETE /api/categories/{{id}}              - Delete category");
    tracing::info!("    GET    /api/products                     - List products");
    tracing::info!("    POST   /api/products                     - Create product");
    tracing::info!("    PUT    /api/products/{{id}}                - Update product");
    tracing::info!("    DELETE /api/products/{{id}}                - Delete product");
    tracing::info!("    POST   /api/products/image-upload-url    - Signed image upload URL");
    tracing::info!("  Orders:");
    tracing::info!("    GET    /api/orders?status=               - List orders");
    tracing::info!("    POST   /api/orders                       - Create order + QRIS");
    tracing::info!("    GET    /api/orders/sales-report          - Sales report");
    tracing::info!("    POST   /api/orders/{{id}}/payment-request  - Retry QRIS payment request");
    tracing::info!("    POST   /api/orders/{{id}}/simulate-payment - Simulate payment (test mode)");
    tracing::info!("    GET    /api/orders/{{id}}/status           - Check payment status");
    tracing::info!("    POST   /api/orders/{{id}}/finish           - Finish order");
}
