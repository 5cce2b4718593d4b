//! Purchase recording service
//!
//! A purchase converts the bought quantity into the ingredient's base unit,
//! recomputes the standing unit cost (last purchase wins, no averaging), and
//! applies one inbound ledger movement, all in a single transaction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{convert_quantity, unit_cost_from_purchase, MovementKind, Unit};

use crate::error::{AppError, AppResult};
use crate::services::inventory::{ApplyMovement, InventoryService, StockSnapshot};

/// Purchase service for recording buys and querying price history
#[derive(Clone)]
pub struct PurchaseService {
    db: PgPool,
}

/// Input for registering a purchase
#[derive(Debug, Deserialize)]
pub struct RegisterPurchaseInput {
    pub ingredient_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub purchased_at: Option<DateTime<Utc>>,
    pub quantity: Decimal,
    pub unit: Unit,
    pub total_price: Decimal,
}

/// A recorded purchase
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IngredientPurchase {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub purchased_at: DateTime<Utc>,
    pub quantity: Decimal,
    pub unit: String,
    pub total_price: Decimal,
    pub unit_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A purchase joined with ingredient and supplier names for listings
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PurchaseListItem {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub base_unit: String,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: Option<String>,
    pub purchased_at: DateTime<Utc>,
    pub quantity: Decimal,
    pub unit: String,
    pub total_price: Decimal,
    pub unit_cost: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Result of registering a purchase
#[derive(Debug, Serialize)]
pub struct PurchaseOutcome {
    pub purchase: IngredientPurchase,
    pub stock: StockSnapshot,
}

impl PurchaseService {
    /// Create a new PurchaseService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a purchase and its inbound ledger movement
    pub async fn register_purchase(
        &self,
        owner_id: Uuid,
        input: RegisterPurchaseInput,
    ) -> AppResult<PurchaseOutcome> {
        let mut tx = self.db.begin().await?;

        let base_unit = sqlx::query_scalar::<_, String>(
            "SELECT base_unit FROM ingredients WHERE id = $1 AND owner_id = $2",
        )
        .bind(input.ingredient_id)
        .bind(owner_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        let base_unit: Unit = base_unit
            .parse()
            .map_err(|e| AppError::InternalError(anyhow::anyhow!("corrupt base unit: {e}")))?;

        if let Some(supplier_id) = input.supplier_id {
            let supplier_exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM suppliers WHERE id = $1 AND owner_id = $2)",
            )
            .bind(supplier_id)
            .bind(owner_id)
            .fetch_one(&mut *tx)
            .await?;

            if !supplier_exists {
                return Err(AppError::NotFound("Supplier".to_string()));
            }
        }

        let unit_cost =
            unit_cost_from_purchase(input.total_price, input.quantity, input.unit, base_unit)
                .map_err(|e| {
                    AppError::IncompatibleUnit(format!("cannot compute unit cost: {e}"))
                })?;

        // Checked independently of the unit cost: cost and stock quantity are
        // separate ledger facts.
        let converted_quantity = convert_quantity(input.quantity, input.unit, base_unit)
            .map_err(|e| AppError::IncompatibleUnit(e.to_string()))?;

        let purchased_at = input.purchased_at.unwrap_or_else(Utc::now);

        let purchase = sqlx::query_as::<_, IngredientPurchase>(
            r#"
            INSERT INTO ingredient_purchases (ingredient_id, supplier_id, purchased_at, quantity, unit, total_price, unit_cost)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, ingredient_id, supplier_id, purchased_at, quantity, unit, total_price, unit_cost, created_at
            "#,
        )
        .bind(input.ingredient_id)
        .bind(input.supplier_id)
        .bind(purchased_at)
        .bind(input.quantity)
        .bind(input.unit.as_str())
        .bind(input.total_price)
        .bind(unit_cost)
        .fetch_one(&mut *tx)
        .await?;

        // Last purchase wins: the standing cost is always the most recent
        // purchase's unit cost, never an average.
        sqlx::query("UPDATE ingredients SET unit_cost = $2, updated_at = NOW() WHERE id = $1")
            .bind(input.ingredient_id)
            .bind(unit_cost)
            .execute(&mut *tx)
            .await?;

        let stock = InventoryService::apply_movement(
            &mut tx,
            ApplyMovement {
                ingredient_id: input.ingredient_id,
                kind: MovementKind::Entry,
                quantity: converted_quantity,
                reason: Some("Entrada por compra".to_string()),
                moved_at: purchased_at,
                purchase_id: Some(purchase.id),
                production_id: None,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(PurchaseOutcome { purchase, stock })
    }

    /// List all purchases for an owner, newest first
    pub async fn list_purchases(&self, owner_id: Uuid) -> AppResult<Vec<PurchaseListItem>> {
        let purchases = sqlx::query_as::<_, PurchaseListItem>(
            r#"
            SELECT p.id, p.ingredient_id, i.name AS ingredient_name, i.base_unit,
                   p.supplier_id, s.name AS supplier_name,
                   p.purchased_at, p.quantity, p.unit, p.total_price, p.unit_cost, p.created_at
            FROM ingredient_purchases p
            JOIN ingredients i ON i.id = p.ingredient_id
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            WHERE i.owner_id = $1
            ORDER BY p.purchased_at DESC, p.created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(purchases)
    }

    /// Purchase history for one ingredient (its price history), newest first
    pub async fn price_history(
        &self,
        owner_id: Uuid,
        ingredient_id: Uuid,
    ) -> AppResult<Vec<PurchaseListItem>> {
        let ingredient_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = $1 AND owner_id = $2)",
        )
        .bind(ingredient_id)
        .bind(owner_id)
        .fetch_one(&self.db)
        .await?;

        if !ingredient_exists {
            return Err(AppError::NotFound("Ingredient".to_string()));
        }

        let purchases = sqlx::query_as::<_, PurchaseListItem>(
            r#"
            SELECT p.id, p.ingredient_id, i.name AS ingredient_name, i.base_unit,
                   p.supplier_id, s.name AS supplier_name,
                   p.purchased_at, p.quantity, p.unit, p.total_price, p.unit_cost, p.created_at
            FROM ingredient_purchases p
            JOIN ingredients i ON i.id = p.ingredient_id
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            WHERE p.ingredient_id = $1
            ORDER BY p.purchased_at DESC, p.created_at DESC
            "#,
        )
        .bind(ingredient_id)
        .fetch_all(&self.db)
        .await?;

        Ok(purchases)
    }
}
