//! HTTP handlers for production endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::production::{
    EditOutcome, EditProductionInput, ProduceInput, Production, ProductionFilter,
    ProductionResult, ProductionService, ProductionSummary, VoidOutcome,
};
use crate::AppState;

/// Query parameters for the production summary
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Produce units of a recipe
pub async fn produce_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(recipe_id): Path<Uuid>,
    Json(input): Json<ProduceInput>,
) -> AppResult<Json<ProductionResult>> {
    let service = ProductionService::new(state.db);
    let result = service
        .produce(current_user.0.owner_id, recipe_id, input)
        .await?;
    Ok(Json(result))
}

/// Void a production, restoring the consumed stock
pub async fn void_production(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(production_id): Path<Uuid>,
) -> AppResult<Json<VoidOutcome>> {
    let service = ProductionService::new(state.db);
    let outcome = service
        .void_production(current_user.0.owner_id, production_id)
        .await?;
    Ok(Json(outcome))
}

/// Edit a production's unit count
pub async fn edit_production(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(production_id): Path<Uuid>,
    Json(input): Json<EditProductionInput>,
) -> AppResult<Json<EditOutcome>> {
    let service = ProductionService::new(state.db);
    let outcome = service
        .edit_production(current_user.0.owner_id, production_id, input)
        .await?;
    Ok(Json(outcome))
}

/// List productions with optional filters
pub async fn list_productions(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(filter): Query<ProductionFilter>,
) -> AppResult<Json<Vec<Production>>> {
    let service = ProductionService::new(state.db);
    let productions = service
        .list_productions(current_user.0.owner_id, filter)
        .await?;
    Ok(Json(productions))
}

/// Aggregate active productions over a date range
pub async fn production_summary(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<ProductionSummary>> {
    let service = ProductionService::new(state.db);
    let summary = service
        .production_summary(current_user.0.owner_id, query.from, query.to)
        .await?;
    Ok(Json(summary))
}
