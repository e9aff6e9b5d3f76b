//! HTTP handlers for super-vendor hierarchy endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentActor;
use crate::models::{
    AssignVendorsInput, BusinessMetrics, CreateSubVendorInput, CreateSuperVendorInput,
    DefaultPricingRules, RemoveVendorInput, SuperVendor, UpdatePricingRulesInput,
    UpdateSuperVendorInput, Vendor,
};
use crate::services::super_vendor::{FleetSummary, SuperVendorDetail, SuperVendorService};
use crate::AppState;
use shared::types::ApiResponse;

/// Super-vendor list payload with the fleet-wide summary
#[derive(Debug, Serialize)]
pub struct SuperVendorListResponse {
    pub super_vendors: Vec<SuperVendor>,
    pub summary: FleetSummary,
}

/// Register a new super-vendor
pub async fn create_super_vendor(
    State(state): State<AppState>,
    actor: CurrentActor,
    Json(input): Json<CreateSuperVendorInput>,
) -> AppResult<Json<ApiResponse<SuperVendor>>> {
    let service = SuperVendorService::new(state.db);
    let super_vendor = service.create(actor.0, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Super vendor created",
        super_vendor,
    )))
}

/// List super-vendors with the aggregate summary
pub async fn list_super_vendors(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<SuperVendorListResponse>>> {
    let service = SuperVendorService::new(state.db);
    let (super_vendors, summary) = service.list().await?;
    Ok(Json(ApiResponse::ok(SuperVendorListResponse {
        super_vendors,
        summary,
    })))
}

/// Get one super-vendor with its sub-vendors
pub async fn get_super_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<SuperVendorDetail>>> {
    let service = SuperVendorService::new(state.db);
    let detail = service.get(id).await?;
    Ok(Json(ApiResponse::ok(detail)))
}

/// Update a super-vendor's identity/contact fields
pub async fn update_super_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateSuperVendorInput>,
) -> AppResult<Json<ApiResponse<SuperVendor>>> {
    let service = SuperVendorService::new(state.db);
    let super_vendor = service.update(id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Super vendor updated",
        super_vendor,
    )))
}

/// Delete a super-vendor, releasing its sub-vendors to direct status
pub async fn delete_super_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<()>>> {
    let service = SuperVendorService::new(state.db);
    let released = service.delete(id).await?;
    Ok(Json(ApiResponse::message_only(format!(
        "Super vendor deleted; {} sub vendors released to direct status",
        released
    ))))
}

/// Attach existing vendors as sub-vendors
pub async fn assign_sub_vendors(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AssignVendorsInput>,
) -> AppResult<Json<ApiResponse<Vec<Vendor>>>> {
    let service = SuperVendorService::new(state.db);
    let vendors = service.assign_sub_vendors(id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Vendors assigned",
        vendors,
    )))
}

/// Detach one sub-vendor back to direct status
pub async fn remove_sub_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<RemoveVendorInput>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let service = SuperVendorService::new(state.db);
    let vendor = service.remove_sub_vendor(id, input.vendor_id).await?;
    Ok(Json(ApiResponse::ok_with_message("Vendor removed", vendor)))
}

/// Create a new sub-vendor under a super-vendor
pub async fn create_sub_vendor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<CreateSubVendorInput>,
) -> AppResult<Json<ApiResponse<Vendor>>> {
    let service = SuperVendorService::new(state.db);
    let vendor = service.create_sub_vendor(id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Sub vendor created",
        vendor,
    )))
}

/// Merge a patch into the default pricing rules
pub async fn update_pricing_rules(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdatePricingRulesInput>,
) -> AppResult<Json<ApiResponse<DefaultPricingRules>>> {
    let service = SuperVendorService::new(state.db);
    let rules = service.update_pricing_rules(id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Pricing rules updated",
        rules,
    )))
}

/// Recompute and persist a super-vendor's aggregate metrics
pub async fn recalculate_metrics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<BusinessMetrics>>> {
    let service = SuperVendorService::new(state.db);
    let metrics = service.recalculate_metrics(id).await?;
    Ok(Json(ApiResponse::ok(metrics)))
}
