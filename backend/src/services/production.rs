//! Production engine and reversal service
//!
//! Producing a recipe consumes every recipe ingredient through the stock
//! ledger (waste included) and records a production snapshot with the total
//! ingredient cost at production time. Voiding replays the production's
//! movements with opposite sign; editing voids and re-produces at the
//! original timestamp with the current recipe and ingredient data.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use shared::{consumption_quantity, MovementKind, ProductionState, ReplenishmentStatus};

use crate::error::{AppError, AppResult};
use crate::services::inventory::{ApplyMovement, InventoryService};

/// Production service for producing, voiding and editing productions
#[derive(Clone)]
pub struct ProductionService {
    db: PgPool,
}

/// Input for producing a recipe
#[derive(Debug, Deserialize)]
pub struct ProduceInput {
    pub units: i32,
    pub produced_at: Option<DateTime<Utc>>,
}

/// Input for editing a production's unit count
#[derive(Debug, Deserialize)]
pub struct EditProductionInput {
    pub units: i32,
}

/// Per-ingredient consumption of one production
#[derive(Debug, Clone, Serialize)]
pub struct ConsumptionLine {
    pub ingredient_id: Uuid,
    pub ingredient_name: String,
    pub quantity_consumed: Decimal,
    pub cost_applied: Decimal,
    pub current_stock: Decimal,
    pub minimum_stock: Decimal,
    pub status: ReplenishmentStatus,
}

/// Result of producing a recipe
#[derive(Debug, Serialize)]
pub struct ProductionResult {
    pub production_id: Uuid,
    pub recipe_id: Uuid,
    pub recipe_name: String,
    pub units: i32,
    pub total_cost: Decimal,
    pub produced_at: DateTime<Utc>,
    pub consumptions: Vec<ConsumptionLine>,
}

/// Result of voiding a production
#[derive(Debug, Serialize)]
pub struct VoidOutcome {
    pub production_id: Uuid,
    pub state: ProductionState,
}

/// Result of editing a production
#[derive(Debug, Serialize)]
pub struct EditOutcome {
    pub voided_production_id: Uuid,
    pub production: ProductionResult,
}

/// A recorded production
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Production {
    pub id: Uuid,
    pub recipe_id: Option<Uuid>,
    pub recipe_name: String,
    pub units: i32,
    pub total_cost: Decimal,
    pub state: String,
    pub produced_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filters for listing productions
#[derive(Debug, Default, Deserialize)]
pub struct ProductionFilter {
    pub recipe_id: Option<Uuid>,
    pub state: Option<ProductionState>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Aggregate over active productions in a date range
#[derive(Debug, Serialize)]
pub struct ProductionSummary {
    pub total_productions: i64,
    pub total_units: i64,
    pub total_cost: Decimal,
}

/// Row for a recipe ingredient joined with its ingredient
#[derive(Debug, FromRow)]
struct RecipeIngredientRow {
    ingredient_id: Uuid,
    ingredient_name: String,
    ingredient_owner_id: Uuid,
    quantity: Decimal,
    unit_cost: Decimal,
    waste_pct: Decimal,
}

/// Row for a production loaded under lock during void/edit
#[derive(Debug, FromRow)]
struct ProductionLockRow {
    id: Uuid,
    recipe_id: Option<Uuid>,
    state: String,
    produced_at: DateTime<Utc>,
}

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Produce `units` of a recipe, consuming stock for every ingredient
    pub async fn produce(
        &self,
        owner_id: Uuid,
        recipe_id: Uuid,
        input: ProduceInput,
    ) -> AppResult<ProductionResult> {
        validate_units(input.units)?;

        let mut tx = self.db.begin().await?;
        let result = Self::produce_in_tx(
            &mut tx,
            owner_id,
            recipe_id,
            input.units,
            input.produced_at.unwrap_or_else(Utc::now),
        )
        .await?;
        tx.commit().await?;

        tracing::info!(
            production_id = %result.production_id,
            recipe = %result.recipe_name,
            units = result.units,
            "production recorded"
        );

        Ok(result)
    }

    /// Production engine core, shared between produce and edit
    async fn produce_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        owner_id: Uuid,
        recipe_id: Uuid,
        units: i32,
        produced_at: DateTime<Utc>,
    ) -> AppResult<ProductionResult> {
        let recipe_name = sqlx::query_scalar::<_, String>(
            "SELECT name FROM recipes WHERE id = $1 AND owner_id = $2",
        )
        .bind(recipe_id)
        .bind(owner_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe".to_string()))?;

        let ingredients = sqlx::query_as::<_, RecipeIngredientRow>(
            r#"
            SELECT ri.ingredient_id, i.name AS ingredient_name, i.owner_id AS ingredient_owner_id,
                   ri.quantity, i.unit_cost, i.waste_pct
            FROM recipe_ingredients ri
            JOIN ingredients i ON i.id = ri.ingredient_id
            WHERE ri.recipe_id = $1
            ORDER BY ri.created_at ASC
            "#,
        )
        .bind(recipe_id)
        .fetch_all(&mut **tx)
        .await?;

        if ingredients.is_empty() {
            return Err(AppError::InvalidState(
                "Recipe has no ingredients to produce".to_string(),
            ));
        }

        // Created up front with a zero cost so every movement can reference a
        // stable production id; the cost is finalized after the loop.
        let production_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO productions (owner_id, recipe_id, recipe_name, units, total_cost, state, produced_at)
            VALUES ($1, $2, $3, $4, 0, 'active', $5)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(recipe_id)
        .bind(&recipe_name)
        .bind(units)
        .bind(produced_at)
        .fetch_one(&mut **tx)
        .await?;

        let mut total_cost = Decimal::ZERO;
        let mut consumptions = Vec::with_capacity(ingredients.len());

        for item in ingredients {
            if item.ingredient_owner_id != owner_id {
                return Err(AppError::NotFound("Ingredient".to_string()));
            }

            let consumed = consumption_quantity(item.quantity, units, item.waste_pct);
            let cost = consumed * item.unit_cost;
            total_cost += cost;

            // Negative resulting stock is accepted.
            let snapshot = InventoryService::apply_movement(
                tx,
                ApplyMovement {
                    ingredient_id: item.ingredient_id,
                    kind: MovementKind::Exit,
                    quantity: consumed,
                    reason: Some(format!("Producción receta {} x{}", recipe_name, units)),
                    moved_at: produced_at,
                    purchase_id: None,
                    production_id: Some(production_id),
                },
            )
            .await?;

            consumptions.push(ConsumptionLine {
                ingredient_id: item.ingredient_id,
                ingredient_name: item.ingredient_name,
                quantity_consumed: consumed,
                cost_applied: cost,
                current_stock: snapshot.current_stock,
                minimum_stock: snapshot.minimum_stock,
                status: snapshot.status,
            });
        }

        sqlx::query("UPDATE productions SET total_cost = $2, updated_at = NOW() WHERE id = $1")
            .bind(production_id)
            .bind(total_cost)
            .execute(&mut **tx)
            .await?;

        Ok(ProductionResult {
            production_id,
            recipe_id,
            recipe_name,
            units,
            total_cost,
            produced_at,
            consumptions,
        })
    }

    /// Void a production, restoring the stock it consumed
    pub async fn void_production(
        &self,
        owner_id: Uuid,
        production_id: Uuid,
    ) -> AppResult<VoidOutcome> {
        let mut tx = self.db.begin().await?;
        Self::void_in_tx(&mut tx, owner_id, production_id).await?;
        tx.commit().await?;

        tracing::info!(%production_id, "production voided");

        Ok(VoidOutcome {
            production_id,
            state: ProductionState::Voided,
        })
    }

    /// Void protocol core, shared between void and edit
    ///
    /// Marks the production voided and appends one compensating entry per
    /// movement tagged with the production. History is never rewritten.
    async fn void_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        owner_id: Uuid,
        production_id: Uuid,
    ) -> AppResult<ProductionLockRow> {
        let production = sqlx::query_as::<_, ProductionLockRow>(
            r#"
            SELECT id, recipe_id, state, produced_at
            FROM productions
            WHERE id = $1 AND owner_id = $2
            FOR UPDATE
            "#,
        )
        .bind(production_id)
        .bind(owner_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Production".to_string()))?;

        if production.state == ProductionState::Voided.as_str() {
            return Err(AppError::InvalidState(
                "Production is already voided".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE productions SET state = 'voided', updated_at = NOW() WHERE id = $1",
        )
        .bind(production_id)
        .execute(&mut **tx)
        .await?;

        // Only exit movements exist under this tag before the first void; the
        // state guard above makes a second pass impossible.
        let movements = sqlx::query_as::<_, (Uuid, Decimal)>(
            r#"
            SELECT ingredient_id, quantity
            FROM stock_movements
            WHERE production_id = $1 AND kind = 'exit'
            ORDER BY created_at ASC
            "#,
        )
        .bind(production_id)
        .fetch_all(&mut **tx)
        .await?;

        let voided_at = Utc::now();
        for (ingredient_id, quantity) in movements {
            InventoryService::apply_movement(
                tx,
                ApplyMovement {
                    ingredient_id,
                    kind: MovementKind::Entry,
                    quantity,
                    reason: Some("Anulación de producción".to_string()),
                    moved_at: voided_at,
                    purchase_id: None,
                    production_id: Some(production_id),
                },
            )
            .await?;
        }

        Ok(production)
    }

    /// Edit a production's unit count
    ///
    /// Runs the full void protocol, then re-produces with the new unit count
    /// at the original timestamp. Costs are recomputed from the *current*
    /// recipe and ingredient data, not the original snapshot.
    pub async fn edit_production(
        &self,
        owner_id: Uuid,
        production_id: Uuid,
        input: EditProductionInput,
    ) -> AppResult<EditOutcome> {
        validate_units(input.units)?;

        let mut tx = self.db.begin().await?;

        let original = Self::void_in_tx(&mut tx, owner_id, production_id).await?;

        let recipe_id = original.recipe_id.ok_or_else(|| {
            AppError::NotFound("Recipe".to_string())
        })?;

        let production = Self::produce_in_tx(
            &mut tx,
            owner_id,
            recipe_id,
            input.units,
            original.produced_at,
        )
        .await?;

        tx.commit().await?;

        tracing::info!(
            voided = %production_id,
            replacement = %production.production_id,
            units = production.units,
            "production edited"
        );

        Ok(EditOutcome {
            voided_production_id: production_id,
            production,
        })
    }

    /// List productions, newest first, with optional filters
    pub async fn list_productions(
        &self,
        owner_id: Uuid,
        filter: ProductionFilter,
    ) -> AppResult<Vec<Production>> {
        let productions = sqlx::query_as::<_, Production>(
            r#"
            SELECT id, recipe_id, recipe_name, units, total_cost, state, produced_at, created_at, updated_at
            FROM productions
            WHERE owner_id = $1
              AND ($2::uuid IS NULL OR recipe_id = $2)
              AND ($3::text IS NULL OR state = $3)
              AND ($4::timestamptz IS NULL OR produced_at >= $4)
              AND ($5::timestamptz IS NULL OR produced_at <= $5)
            ORDER BY produced_at DESC
            "#,
        )
        .bind(owner_id)
        .bind(filter.recipe_id)
        .bind(filter.state.map(|s| s.as_str()))
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.db)
        .await?;

        Ok(productions)
    }

    /// Aggregate active productions over a date range; with no bounds given
    /// the range is the current day
    pub async fn production_summary(
        &self,
        owner_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> AppResult<ProductionSummary> {
        let (from, to) = summary_range(Utc::now(), from, to);

        let row = sqlx::query_as::<_, (i64, Option<i64>, Option<Decimal>)>(
            r#"
            SELECT COUNT(id), SUM(units)::bigint, SUM(total_cost)
            FROM productions
            WHERE owner_id = $1 AND state = 'active' AND produced_at >= $2 AND produced_at < $3
            "#,
        )
        .bind(owner_id)
        .bind(from)
        .bind(to)
        .fetch_one(&self.db)
        .await?;

        Ok(ProductionSummary {
            total_productions: row.0,
            total_units: row.1.unwrap_or(0),
            total_cost: row.2.unwrap_or(Decimal::ZERO),
        })
    }
}

/// Resolve the summary window. Each bound defaults independently: `from` to
/// today's start, `to` to tomorrow's start, so an explicit past `from` with no
/// `to` covers everything from that point through today.
fn summary_range(
    now: DateTime<Utc>,
    from: Option<DateTime<Utc>>,
    to: Option<DateTime<Utc>>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    let day_start = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);
    (
        from.unwrap_or(day_start),
        to.unwrap_or(day_start + Duration::days(1)),
    )
}

fn validate_units(units: i32) -> AppResult<()> {
    if units <= 0 {
        return Err(AppError::Validation {
            field: "units".to_string(),
            message: "Units must be a positive integer".to_string(),
            message_es: "Las unidades deben ser un entero positivo".to_string(),
        });
    }
    Ok(())
}
