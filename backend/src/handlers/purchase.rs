//! HTTP handlers for purchase endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::purchase::{
    PurchaseListItem, PurchaseOutcome, PurchaseService, RegisterPurchaseInput,
};
use crate::AppState;

/// Register a purchase
pub async fn register_purchase(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<RegisterPurchaseInput>,
) -> AppResult<Json<PurchaseOutcome>> {
    let service = PurchaseService::new(state.db);
    let outcome = service
        .register_purchase(current_user.0.owner_id, input)
        .await?;
    Ok(Json(outcome))
}

/// List all purchases
pub async fn list_purchases(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<PurchaseListItem>>> {
    let service = PurchaseService::new(state.db);
    let purchases = service.list_purchases(current_user.0.owner_id).await?;
    Ok(Json(purchases))
}

/// Purchase history for one ingredient
pub async fn get_price_history(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(ingredient_id): Path<Uuid>,
) -> AppResult<Json<Vec<PurchaseListItem>>> {
    let service = PurchaseService::new(state.db);
    let purchases = service
        .price_history(current_user.0.owner_id, ingredient_id)
        .await?;
    Ok(Json(purchases))
}
