//! HTTP handlers for inventory allocation endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::ProductPricingPatch;
use crate::services::inventory::{
    AssignStockInput, InventoryLineView, InventoryService, SellStockInput, TransferStockInput,
};
use crate::AppState;
use shared::types::ApiResponse;

/// Allocate warehouse stock to a super-vendor
pub async fn assign_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<AssignStockInput>,
) -> AppResult<Json<ApiResponse<InventoryLineView>>> {
    let service = InventoryService::new(state.db);
    let line = service.assign_to_super_vendor(id, input).await?;
    Ok(Json(ApiResponse::ok_with_message("Stock assigned", line)))
}

/// List a super-vendor's inventory with resolved prices
pub async fn list_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Vec<InventoryLineView>>>> {
    let service = InventoryService::new(state.db);
    let lines = service.list_super_vendor_inventory(id).await?;
    Ok(Json(ApiResponse::ok(lines)))
}

/// Transfer stock from a super-vendor to one of its sub-vendors
pub async fn transfer_inventory(
    State(state): State<AppState>,
    Path((id, vendor_id)): Path<(Uuid, Uuid)>,
    Json(input): Json<TransferStockInput>,
) -> AppResult<Json<ApiResponse<()>>> {
    let service = InventoryService::new(state.db);
    service.transfer_to_sub_vendor(id, vendor_id, input).await?;
    Ok(Json(ApiResponse::message_only("Stock transferred")))
}

/// Record a direct sale from the super-vendor's pool
pub async fn sell_inventory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<SellStockInput>,
) -> AppResult<Json<ApiResponse<Decimal>>> {
    let service = InventoryService::new(state.db);
    let sale_amount = service.sell_direct(id, input).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Sale recorded",
        sale_amount,
    )))
}

/// Merge a pricing patch into one inventory line
pub async fn set_product_pricing(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
    Json(patch): Json<ProductPricingPatch>,
) -> AppResult<Json<ApiResponse<InventoryLineView>>> {
    let service = InventoryService::new(state.db);
    let line = service.set_product_pricing(id, product_id, patch).await?;
    Ok(Json(ApiResponse::ok_with_message(
        "Product pricing updated",
        line,
    )))
}

/// Return a line's unsold units to the warehouse and remove the line
pub async fn remove_inventory(
    State(state): State<AppState>,
    Path((id, product_id)): Path<(Uuid, Uuid)>,
) -> AppResult<Json<ApiResponse<()>>> {
    let service = InventoryService::new(state.db);
    let returned = service.remove_from_inventory(id, product_id).await?;
    Ok(Json(ApiResponse::message_only(format!(
        "Inventory line removed; {} units returned to warehouse",
        returned
    ))))
}
