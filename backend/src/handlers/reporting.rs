//! HTTP handlers for dashboard reporting

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::reporting::{DashboardReport, ReportingService};
use crate::AppState;
use shared::types::ApiResponse;

/// Platform-wide dashboard rollup
pub async fn get_dashboard(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<DashboardReport>>> {
    let service = ReportingService::new(state.db);
    let report = service.dashboard().await?;
    Ok(Json(ApiResponse::ok(report)))
}
