//! HTTP handlers for the transaction ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentActor;
use crate::models::{RecordPaymentInput, SuperVendorTransaction};
use crate::services::ledger::{LedgerFilter, LedgerService, PaymentStats};
use crate::AppState;
use shared::types::ApiResponse;

/// Record a payment against a super-vendor
pub async fn record_payment(
    State(state): State<AppState>,
    actor: CurrentActor,
    Path(id): Path<Uuid>,
    Json(input): Json<RecordPaymentInput>,
) -> AppResult<Json<ApiResponse<SuperVendorTransaction>>> {
    let service = LedgerService::new(state.db);
    let transaction = service.record_payment(id, actor.0, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Payment recorded",
        transaction,
    )))
}

/// Read the ledger, filterable by date range and type
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(filter): Query<LedgerFilter>,
) -> AppResult<Json<ApiResponse<Vec<SuperVendorTransaction>>>> {
    let service = LedgerService::new(state.db);
    let transactions = service.get_ledger(id, filter).await?;
    Ok(Json(ApiResponse::ok(transactions)))
}

/// Download the ledger as CSV
pub async fn export_ledger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(filter): Query<LedgerFilter>,
) -> AppResult<impl IntoResponse> {
    let service = LedgerService::new(state.db);
    let csv = service.export_ledger_csv(id, filter).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"ledger.csv\"",
            ),
        ],
        csv,
    ))
}

/// Delete a ledger entry, reversing aggregates for payment-type entries
pub async fn delete_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let service = LedgerService::new(state.db);
    service.delete_transaction(transaction_id).await?;
    Ok(Json(ApiResponse::message_only("Transaction deleted")))
}

/// Monthly payment trends and method breakdown
pub async fn payment_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<PaymentStats>>> {
    let service = LedgerService::new(state.db);
    let stats = service.payment_stats(id).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
