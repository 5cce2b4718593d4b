//! HTTP handlers for stock ledger endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::inventory::{
    InventoryService, RecordMovementInput, StockAlert, StockMovement, StockSnapshot,
};
use crate::AppState;

/// Query parameters for listing movements
#[derive(Debug, Deserialize)]
pub struct MovementQuery {
    pub ingredient_id: Option<Uuid>,
    pub limit: Option<i64>,
}

/// Body for setting the minimum-stock threshold
#[derive(Debug, Deserialize)]
pub struct MinimumStockInput {
    pub minimum_stock: Decimal,
}

/// Record a manual stock movement
pub async fn record_movement(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RecordMovementInput>,
) -> AppResult<Json<StockSnapshot>> {
    let service = InventoryService::new(state.db);
    let snapshot = service
        .record_movement(current_user.0.owner_id, input)
        .await?;
    Ok(Json(snapshot))
}

/// List recent stock movements
pub async fn list_movements(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<MovementQuery>,
) -> AppResult<Json<Vec<StockMovement>>> {
    let service = InventoryService::new(state.db);
    let movements = service
        .list_movements(current_user.0.owner_id, query.ingredient_id, query.limit)
        .await?;
    Ok(Json(movements))
}

/// Get the stock position for an ingredient
pub async fn get_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(ingredient_id): Path<Uuid>,
) -> AppResult<Json<StockSnapshot>> {
    let service = InventoryService::new(state.db);
    let snapshot = service
        .get_stock(current_user.0.owner_id, ingredient_id)
        .await?;
    Ok(Json(snapshot))
}

/// Set the minimum-stock threshold for an ingredient
pub async fn set_minimum_stock(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(ingredient_id): Path<Uuid>,
    Json(input): Json<MinimumStockInput>,
) -> AppResult<Json<StockSnapshot>> {
    let service = InventoryService::new(state.db);
    let snapshot = service
        .set_minimum_stock(current_user.0.owner_id, ingredient_id, input.minimum_stock)
        .await?;
    Ok(Json(snapshot))
}

/// Replenishment overview for all tracked ingredients
pub async fn stock_alerts(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<StockAlert>>> {
    let service = InventoryService::new(state.db);
    let alerts = service.stock_alerts(current_user.0.owner_id).await?;
    Ok(Json(alerts))
}
