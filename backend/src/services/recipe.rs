//! Recipe catalog service
//!
//! Recipes are the read model of the production engine: an ordered list of
//! (ingredient, quantity per recipe unit) pairs, quantities expressed in each
//! ingredient's base unit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Recipe catalog service
#[derive(Clone)]
pub struct RecipeService {
    db: PgPool,
}

/// A recipe record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeIngredient {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub base_unit: String,
    pub quantity: Decimal,
}

/// A recipe with its ingredient lines
#[derive(Debug, Serialize)]
pub struct RecipeWithIngredients {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredient>,
}

/// Input line for creating a recipe
#[derive(Debug, Deserialize)]
pub struct RecipeIngredientInput {
    pub ingredient_id: Uuid,
    pub quantity: Decimal,
}

/// Input for creating a recipe
#[derive(Debug, Deserialize)]
pub struct CreateRecipeInput {
    pub name: String,
    pub ingredients: Vec<RecipeIngredientInput>,
}

impl RecipeService {
    /// Create a new RecipeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a recipe with its ingredient lines
    pub async fn create_recipe(
        &self,
        owner_id: Uuid,
        input: CreateRecipeInput,
    ) -> AppResult<RecipeWithIngredients> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name must not be empty".to_string(),
                message_es: "El nombre no puede estar vacío".to_string(),
            });
        }
        for line in &input.ingredients {
            if line.quantity <= Decimal::ZERO {
                return Err(AppError::Validation {
                    field: "ingredients.quantity".to_string(),
                    message: "Ingredient quantity must be positive".to_string(),
                    message_es: "La cantidad del ingrediente debe ser positiva".to_string(),
                });
            }
        }

        let mut tx = self.db.begin().await?;

        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (owner_id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(input.name.trim())
        .fetch_one(&mut *tx)
        .await?;

        for line in &input.ingredients {
            let ingredient_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = $1 AND owner_id = $2)",
            )
            .bind(line.ingredient_id)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

            if !ingredient_exists {
                return Err(AppError::NotFound("Ingredient".to_string()));
            }

            sqlx::query(
                "INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity) VALUES ($1, $2, $3)",
            )
            .bind(recipe.id)
            .bind(line.ingredient_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.get_recipe(owner_id, recipe.id).await
    }

    /// List recipes for an owner, alphabetically
    pub async fn list_recipes(&self, owner_id: Uuid) -> AppResult<Vec<Recipe>> {
        let recipes = sqlx::query_as::<_, Recipe>(
            "SELECT id, name, created_at, updated_at FROM recipes WHERE owner_id = $1 ORDER BY name ASC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(recipes)
    }

    /// Get a recipe with its ingredient lines in insertion order
    pub async fn get_recipe(
        &self,
        owner_id: Uuid,
        recipe_id: Uuid,
    ) -> AppResult<RecipeWithIngredients> {
        let recipe = sqlx::query_as::<_, Recipe>(
            "SELECT id, name, created_at, updated_at FROM recipes WHERE id = $1 AND owner_id = $2",
        )
        .bind(recipe_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe".to_string()))?;

        let ingredients = sqlx::query_as::<_, RecipeIngredient>(
            r#"
            SELECT ri.ingredient_id, i.name AS ingredient_name, i.base_unit, ri.quantity
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.created_at ASC
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&self.db)
        .await?;

        Ok(RecipeWithIngredients {
            recipe,
            ingredients,
        })
    }
}
