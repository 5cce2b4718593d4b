//! HTTP handlers for recipe catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::recipe::{CreateRecipeInput, Recipe, RecipeService, RecipeWithIngredients};
use crate::AppState;

/// Create a recipe with its ingredient lines
pub async fn create_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(input): Json<CreateRecipeInput>,
) -> AppResult<Json<RecipeWithIngredients>> {
    let service = RecipeService::new(state.db);
    let recipe = service.create_recipe(current_user.0.owner_id, input).await?;
    Ok(Json(recipe))
}

/// List recipes
pub async fn list_recipes(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Recipe>>> {
    let service = RecipeService::new(state.db);
    let recipes = service.list_recipes(current_user.0.owner_id).await?;
    Ok(Json(recipes))
}

/// Get a recipe with its ingredient lines
pub async fn get_recipe(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(recipe_id): Path<Uuid>,
) -> AppResult<Json<RecipeWithIngredients>> {
    let service = RecipeService::new(state.db);
    let recipe = service
        .get_recipe(current_user.0.owner_id, recipe_id)
        .await?;
    Ok(Json(recipe))
}
