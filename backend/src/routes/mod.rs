//! Route definitions for the Vehicle Marketplace Platform

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (includes database connectivity)
        .route("/health", get(handlers::health_check))
        // Super-vendor hierarchy, inventory, and ledger
        .nest("/super-vendors", super_vendor_routes())
        // Platform dashboard
        .route("/dashboard", get(handlers::get_dashboard))
}

/// Super-vendor routes
fn super_vendor_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(handlers::create_super_vendor).get(handlers::list_super_vendors),
        )
        // Invoice/transaction lookups not scoped to one super-vendor
        .route("/invoices/:invoice_id", get(handlers::get_invoice))
        .route(
            "/invoices/:invoice_id/status",
            put(handlers::update_invoice_status),
        )
        .route(
            "/transactions/:transaction_id",
            delete(handlers::delete_transaction),
        )
        .route(
            "/:id",
            get(handlers::get_super_vendor)
                .put(handlers::update_super_vendor)
                .delete(handlers::delete_super_vendor),
        )
        // Hierarchy management
        .route("/:id/assign-vendors", post(handlers::assign_sub_vendors))
        .route("/:id/remove-vendor", post(handlers::remove_sub_vendor))
        .route("/:id/create-sub-vendor", post(handlers::create_sub_vendor))
        .route(
            "/:id/recalculate-metrics",
            post(handlers::recalculate_metrics),
        )
        // Inventory allocation
        .route("/:id/inventory", get(handlers::list_inventory))
        .route("/:id/inventory/assign", post(handlers::assign_inventory))
        .route(
            "/:id/inventory/:product_id/pricing",
            put(handlers::set_product_pricing),
        )
        .route(
            "/:id/inventory/:product_id",
            delete(handlers::remove_inventory),
        )
        .route(
            "/:id/sub-vendors/:vendor_id/inventory",
            post(handlers::transfer_inventory),
        )
        .route("/:id/sell", post(handlers::sell_inventory))
        // Pricing rules
        .route("/:id/pricing-rules", put(handlers::update_pricing_rules))
        // Ledger and payments
        .route("/:id/payments", post(handlers::record_payment))
        .route("/:id/ledger", get(handlers::get_ledger))
        .route("/:id/ledger/export", get(handlers::export_ledger))
        .route("/:id/payment-stats", get(handlers::payment_stats))
        // Invoices
        .route(
            "/:id/invoices",
            post(handlers::create_invoice).get(handlers::list_invoices),
        )
}
