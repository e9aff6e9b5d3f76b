//! HTTP handlers for invoice endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentActor;
use crate::models::{CreateInvoiceInput, SuperVendorInvoice, UpdateInvoiceStatusInput};
use crate::services::invoice::{InvoiceService, InvoiceSummary};
use crate::AppState;
use shared::types::ApiResponse;

/// Invoice list payload with the aggregate summary
#[derive(Debug, Serialize)]
pub struct InvoiceListResponse {
    pub invoices: Vec<SuperVendorInvoice>,
    pub summary: InvoiceSummary,
}

/// Raise an invoice for a super-vendor
pub async fn create_invoice(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateInvoiceInput>,
) -> AppResult<Json<ApiResponse<SuperVendorInvoice>>> {
    let service = InvoiceService::new(state.db);
    let invoice = service.create_invoice(id, actor.0, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Invoice created",
        invoice,
    )))
}

/// List a super-vendor's invoices with the summary
pub async fn list_invoices(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<InvoiceListResponse>>> {
    let service = InvoiceService::new(state.db);
    let (invoices, summary) = service.list_invoices(id).await?;
    Ok(Json(ApiResponse::ok(InvoiceListResponse {
        invoices,
        summary,
    })))
}

/// Get one invoice with its items and payments
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SuperVendorInvoice>>> {
    let service = InvoiceService::new(state.db);
    let invoice = service.get_invoice(invoice_id).await?;
    Ok(Json(ApiResponse::ok(invoice)))
}

/// Manual invoice status override
pub async fn update_invoice_status(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
    Json(input): Json<UpdateInvoiceStatusInput>,
) -> AppResult<Json<ApiResponse<SuperVendorInvoice>>> {
    let service = InvoiceService::new(state.db);
    let invoice = service.update_status(invoice_id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Invoice status updated",
        invoice,
    )))
}
