//! Stock ledger service: the only code allowed to mutate stock balances
//!
//! The balance is a materialized running total over the append-only movement
//! log. Every balance mutation happens through [`InventoryService::apply_movement`],
//! which writes the new balance and exactly one movement row in the caller's
//! transaction. Movements are never updated or deleted; corrections are made
//! by appending compensating movements. Negative balances are accepted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use shared::{movement_delta, replenishment_status, MovementKind, ReplenishmentStatus};

use crate::error::{AppError, AppResult};

/// Inventory service for the stock ledger and manual movements
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// One movement to apply to the ledger, inside an existing transaction
#[derive(Debug, Clone)]
pub struct ApplyMovement {
    pub ingredient_id: Uuid,
    pub kind: MovementKind,
    pub quantity: Decimal,
    pub reason: Option<String>,
    pub moved_at: DateTime<Utc>,
    pub purchase_id: Option<Uuid>,
    pub production_id: Option<Uuid>,
}

/// Current stock position of one ingredient
#[derive(Debug, Clone, Serialize)]
pub struct StockSnapshot {
    pub ingredient_id: Uuid,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub status: ReplenishmentStatus,
}

/// Input for recording a manual movement
#[derive(Debug, Deserialize)]
pub struct RecordMovementInput {
    pub ingredient_id: Uuid,
    pub kind: MovementKind,
    pub quantity: Decimal,
    pub reason: Option<String>,
    pub moved_at: Option<DateTime<Utc>>,
}

/// A stock movement joined with its ingredient
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StockMovement {
    pub id: Uuid,
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub base_unit: String,
    pub kind: String,
    pub quantity: Decimal,
    pub reason: Option<String>,
    pub purchase_id: Option<Uuid>,
    pub production_id: Option<Uuid>,
    pub moved_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Replenishment overview row for one ingredient
#[derive(Debug, Clone, Serialize)]
pub struct StockAlert {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub status: ReplenishmentStatus,
}

/// Row for the alert query
#[derive(Debug, FromRow)]
struct StockAlertRow {
    ingredient_id: Uuid,
    ingredient_name: String,
    current_stock: Decimal,
    minimum_stock: Decimal,
}

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Apply one movement to the ledger inside the caller's transaction.
    ///
    /// Lazily creates the stock row, locks it (`FOR UPDATE`) so concurrent
    /// writers on the same ingredient are serialized, writes the new balance
    /// and inserts the movement row. Returns the resulting stock position.
    pub async fn apply_movement(
        tx: &mut Transaction<'_, Postgres>,
        input: ApplyMovement,
    ) -> AppResult<StockSnapshot> {
        sqlx::query(
            "INSERT INTO ingredient_stock (ingredient_id) VALUES ($1) ON CONFLICT (ingredient_id) DO NOTHING",
        )
        .bind(input.ingredient_id)
        .execute(&mut **tx)
        .await?;

        let (current, minimum) = sqlx::query_as::<_, (Decimal, Decimal)>(
            "SELECT current_stock, minimum_stock FROM ingredient_stock WHERE ingredient_id = $1 FOR UPDATE",
        )
        .bind(input.ingredient_id)
        .fetch_one(&mut **tx)
        .await?;

        let next = current + movement_delta(input.kind, input.quantity);

        sqlx::query(
            "UPDATE ingredient_stock SET current_stock = $2, updated_at = NOW() WHERE ingredient_id = $1",
        )
        .bind(input.ingredient_id)
        .bind(next)
        .execute(&mut **tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO stock_movements (ingredient_id, kind, quantity, reason, purchase_id, production_id, moved_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(input.ingredient_id)
        .bind(input.kind.as_str())
        .bind(input.quantity)
        .bind(&input.reason)
        .bind(input.purchase_id)
        .bind(input.production_id)
        .bind(input.moved_at)
        .execute(&mut **tx)
        .await?;

        Ok(StockSnapshot {
            ingredient_id: input.ingredient_id,
            current_stock: next,
            minimum_stock: minimum,
            status: replenishment_status(next, minimum),
        })
    }

    /// Record a manual movement (entry, exit, or adjustment)
    ///
    /// Manual movements are always expressed in the ingredient's base unit;
    /// no conversion occurs and the standing unit cost is untouched.
    pub async fn record_movement(
        &self,
        owner_id: Uuid,
        input: RecordMovementInput,
    ) -> AppResult<StockSnapshot> {
        if input.quantity == Decimal::ZERO {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity must not be zero".to_string(),
                message_es: "La cantidad no puede ser cero".to_string(),
            });
        }
        if matches!(input.kind, MovementKind::Entry | MovementKind::Exit)
            && input.quantity < Decimal::ZERO
        {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity must be positive for entries and exits".to_string(),
                message_es: "La cantidad debe ser positiva para entradas y salidas".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let ingredient_exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM ingredients WHERE id = $1 AND owner_id = $2)",
        )
        .bind(input.ingredient_id)
        .bind(owner_id)
        .fetch_one(&mut *tx)
        .await?;

        if !ingredient_exists {
            return Err(AppError::NotFound("Ingredient".to_string()));
        }

        let snapshot = Self::apply_movement(
            &mut tx,
            ApplyMovement {
                ingredient_id: input.ingredient_id,
                kind: input.kind,
                quantity: input.quantity,
                reason: input.reason,
                moved_at: input.moved_at.unwrap_or_else(Utc::now),
                purchase_id: None,
                production_id: None,
            },
        )
        .await?;

        tx.commit().await?;

        Ok(snapshot)
    }

    /// Get the stock position for an ingredient
    ///
    /// Ingredients never touched by the ledger report zero balance and
    /// minimum; the stock row itself is only created on the first movement.
    pub async fn get_stock(&self, owner_id: Uuid, ingredient_id: Uuid) -> AppResult<StockSnapshot> {
        let row = sqlx::query_as::<_, (Uuid, Option<Decimal>, Option<Decimal>)>(
            r#"
            SELECT i.id, s.current_stock, s.minimum_stock
            FROM ingredients i
            LEFT JOIN ingredient_stock s ON s.ingredient_id = i.id
            WHERE i.id = $1 AND i.owner_id = $2
            "#,
        )
        .bind(ingredient_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Ingredient".to_string()))?;

        let current = row.1.unwrap_or(Decimal::ZERO);
        let minimum = row.2.unwrap_or(Decimal::ZERO);

        Ok(StockSnapshot {
            ingredient_id,
            current_stock: current,
            minimum_stock: minimum,
            status: replenishment_status(current, minimum),
        })
    }

    /// Set the minimum-stock threshold for an ingredient
    pub async fn set_minimum_stock(
        &self,
        owner_id: Uuid,
        ingredient_id: Uuid,
        minimum_stock: Decimal,
    ) -> AppResult<StockSnapshot> {
        if minimum_stock < Decimal::ZERO {
            return Err(AppError::Validation {
                field: "minimum_stock".to_string(),
                message: "Minimum stock must not be negative".to_string(),
                message_es: "El stock mínimo no puede ser negativo".to_string(),
            });
        }

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

        let (current, minimum) = sqlx::query_as::<_, (Decimal, Decimal)>(
            r#"
            INSERT INTO ingredient_stock (ingredient_id, minimum_stock)
            VALUES ($1, $2)
            ON CONFLICT (ingredient_id)
            DO UPDATE SET minimum_stock = EXCLUDED.minimum_stock, updated_at = NOW()
            RETURNING current_stock, minimum_stock
            "#,
        )
        .bind(ingredient_id)
        .bind(minimum_stock)
        .fetch_one(&self.db)
        .await?;

        Ok(StockSnapshot {
            ingredient_id,
            current_stock: current,
            minimum_stock: minimum,
            status: replenishment_status(current, minimum),
        })
    }

    /// List recent movements, newest first
    pub async fn list_movements(
        &self,
        owner_id: Uuid,
        ingredient_id: Option<Uuid>,
        limit: Option<i64>,
    ) -> AppResult<Vec<StockMovement>> {
        let limit = limit.unwrap_or(150).clamp(1, 500);

        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT m.id, m.ingredient_id, i.name AS ingredient_name, i.base_unit,
                   m.kind, m.quantity, m.reason, m.purchase_id, m.production_id,
                   m.moved_at, m.created_at
            FROM stock_movements m
            JOIN ingredients i ON i.id = m.ingredient_id
            WHERE i.owner_id = $1
              AND ($2::uuid IS NULL OR m.ingredient_id = $2)
            ORDER BY m.moved_at DESC, m.created_at DESC
            LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(ingredient_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        Ok(movements)
    }

    /// Replenishment overview for all tracked ingredients, lowest stock first
    pub async fn stock_alerts(&self, owner_id: Uuid) -> AppResult<Vec<StockAlert>> {
        let rows = sqlx::query_as::<_, StockAlertRow>(
            r#"
            SELECT s.ingredient_id, i.name AS ingredient_name, s.current_stock, s.minimum_stock
            FROM ingredient_stock s
            JOIN ingredients i ON i.id = s.ingredient_id
            WHERE i.owner_id = $1
            ORDER BY s.current_stock ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| StockAlert {
                ingredient_id: r.ingredient_id,
                ingredient_name: r.ingredient_name,
                current_stock: r.current_stock,
                minimum_stock: r.minimum_stock,
                status: replenishment_status(r.current_stock, r.minimum_stock),
            })
            .collect())
    }
}
