//! Ingredient catalog service
//!
//! CRUD for the ingredient read model consumed by the ledger, purchase and
//! production engines. The standing unit cost is deliberately not editable
//! here: purchases are its only source of truth.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::Unit;

use crate::error::{AppError, AppResult};

/// Ingredient catalog service
#[derive(Clone)]
pub struct IngredientService {
    db: PgPool,
}

/// An ingredient record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub base_unit: String,
    pub unit_cost: Decimal,
    pub waste_pct: Decimal,
    pub supplier_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating an ingredient
#[derive(Debug, Deserialize)]
pub struct CreateIngredientInput {
    pub name: String,
    pub category: Option<String>,
    pub base_unit: Unit,
    pub waste_pct: Option<Decimal>,
    pub supplier_name: Option<String>,
}

/// Input for updating an ingredient
#[derive(Debug, Deserialize)]
pub struct UpdateIngredientInput {
    pub name: Option<String>,
    pub category: Option<String>,
    pub waste_pct: Option<Decimal>,
    pub supplier_name: Option<String>,
}

impl IngredientService {
    /// Create a new IngredientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create an ingredient
    pub async fn create_ingredient(
        &self,
        owner_id: Uuid,
        input: CreateIngredientInput,
    ) -> AppResult<Ingredient> {
        validate_name(&input.name)?;
        let waste_pct = input.waste_pct.unwrap_or(Decimal::ZERO);
        validate_waste_pct(waste_pct)?;

        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            INSERT INTO ingredients (owner_id, name, category, base_unit, waste_pct, supplier_name)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, category, base_unit, unit_cost, waste_pct, supplier_name,
                      created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(input.name.trim())
        .bind(&input.category)
        .bind(input.base_unit.as_str())
        .bind(waste_pct)
        .bind(&input.supplier_name)
        .fetch_one(&self.db)
        .await?;

        Ok(ingredient)
    }

    /// List ingredients for an owner, alphabetically
    pub async fn list_ingredients(&self, owner_id: Uuid) -> AppResult<Vec<Ingredient>> {
        let ingredients = sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, category, base_unit, unit_cost, waste_pct, supplier_name,
                   created_at, updated_at
            FROM ingredients
            WHERE owner_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(ingredients)
    }

    /// Get one ingredient
    pub async fn get_ingredient(
        &self,
        owner_id: Uuid,
        ingredient_id: Uuid,
    ) -> AppResult<Ingredient> {
        sqlx::query_as::<_, Ingredient>(
            r#"
            SELECT id, name, category, base_unit, unit_cost, waste_pct, supplier_name,
                   created_at, updated_at
            FROM ingredients
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(ingredient_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))
    }

    /// Update an ingredient's editable fields
    pub async fn update_ingredient(
        &self,
        owner_id: Uuid,
        ingredient_id: Uuid,
        input: UpdateIngredientInput,
    ) -> AppResult<Ingredient> {
        let existing = self.get_ingredient(owner_id, ingredient_id).await?;

        let name = input.name.unwrap_or(existing.name);
        validate_name(&name)?;
        let category = input.category.or(existing.category);
        let waste_pct = input.waste_pct.unwrap_or(existing.waste_pct);
        validate_waste_pct(waste_pct)?;
        let supplier_name = input.supplier_name.or(existing.supplier_name);

        let ingredient = sqlx::query_as::<_, Ingredient>(
            r#"
            UPDATE ingredients
            SET name = $1, category = $2, waste_pct = $3, supplier_name = $4, updated_at = NOW()
            WHERE id = $5 AND owner_id = $6
            RETURNING id, name, category, base_unit, unit_cost, waste_pct, supplier_name,
                      created_at, updated_at
            "#,
        )
        .bind(name.trim())
        .bind(&category)
        .bind(waste_pct)
        .bind(&supplier_name)
        .bind(ingredient_id)
        .bind(owner_id)
        .fetch_one(&self.db)
        .await?;

        Ok(ingredient)
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation {
            field: "name".to_string(),
            message: "Name must not be empty".to_string(),
            message_es: "El nombre no puede estar vacío".to_string(),
        });
    }
    Ok(())
}

fn validate_waste_pct(waste_pct: Decimal) -> AppResult<()> {
    if waste_pct < Decimal::ZERO {
        return Err(AppError::Validation {
            field: "waste_pct".to_string(),
            message: "Waste percentage must not be negative".to_string(),
            message_es: "El porcentaje de merma no puede ser negativo".to_string(),
        });
    }
    Ok(())
}
