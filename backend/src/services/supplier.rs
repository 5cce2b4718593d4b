//! Supplier catalog service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Supplier catalog service
#[derive(Clone)]
pub struct SupplierService {
    db: PgPool,
}

/// A supplier record
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Supplier {
    pub id: Uuid,
    pub name: String,
    pub contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a supplier
#[derive(Debug, Deserialize)]
pub struct CreateSupplierInput {
    pub name: String,
    pub contact: Option<String>,
}

impl SupplierService {
    /// Create a new SupplierService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a supplier
    pub async fn create_supplier(
        &self,
        owner_id: Uuid,
        input: CreateSupplierInput,
    ) -> AppResult<Supplier> {
        if input.name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name must not be empty".to_string(),
                message_es: "El nombre no puede estar vacío".to_string(),
            });
        }

        let supplier = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (owner_id, name, contact)
            VALUES ($1, $2, $3)
            RETURNING id, name, contact, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(input.name.trim())
        .bind(&input.contact)
        .fetch_one(&self.db)
        .await?;

        Ok(supplier)
    }

    /// List suppliers for an owner, alphabetically
    pub async fn list_suppliers(&self, owner_id: Uuid) -> AppResult<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r#"
            SELECT id, name, contact, created_at, updated_at
            FROM suppliers
            WHERE owner_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(suppliers)
    }
}
