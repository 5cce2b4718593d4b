//! HTTP handlers for ingredient catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::ingredient::{
    CreateIngredientInput, Ingredient, IngredientService, UpdateIngredientInput,
};
use crate::AppState;

/// Create an ingredient
pub async fn create_ingredient(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateIngredientInput>,
) -> AppResult<Json<Ingredient>> {
    let service = IngredientService::new(state.db);
    let ingredient = service
        .create_ingredient(current_user.0.owner_id, input)
        .await?;
    Ok(Json(ingredient))
}

/// List ingredients
pub async fn list_ingredients(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Ingredient>>> {
    let service = IngredientService::new(state.db);
    let ingredients = service.list_ingredients(current_user.0.owner_id).await?;
    Ok(Json(ingredients))
}

/// Get one ingredient
pub async fn get_ingredient(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(ingredient_id): Path<Uuid>,
) -> AppResult<Json<Ingredient>> {
    let service = IngredientService::new(state.db);
    let ingredient = service
        .get_ingredient(current_user.0.owner_id, ingredient_id)
        .await?;
    Ok(Json(ingredient))
}

/// Update an ingredient
pub async fn update_ingredient(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(ingredient_id): Path<Uuid>,
    Json(input): Json<UpdateIngredientInput>,
) -> AppResult<Json<Ingredient>> {
    let service = IngredientService::new(state.db);
    let ingredient = service
        .update_ingredient(current_user.0.owner_id, ingredient_id, input)
        .await?;
    Ok(Json(ingredient))
}
