//! Core domain types used across the platform

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Measurement group a unit belongs to. Conversion is only defined within a
/// single group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitGroup {
    Mass,
    Volume,
    Count,
}

/// Measurement units an ingredient can be tracked in.
///
/// Each unit carries a fixed multiplicative factor to the canonical magnitude
/// of its group (gram, milliliter, piece).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Gram,
    Kilogram,
    Milliliter,
    Liter,
    Piece,
}

impl Unit {
    pub fn group(&self) -> UnitGroup {
        match self {
            Unit::Gram | Unit::Kilogram => UnitGroup::Mass,
            Unit::Milliliter | Unit::Liter => UnitGroup::Volume,
            Unit::Piece => UnitGroup::Count,
        }
    }

    /// Factor to the canonical unit of the group.
    pub fn factor_to_canonical(&self) -> Decimal {
        match self {
            Unit::Gram | Unit::Milliliter | Unit::Piece => Decimal::ONE,
            Unit::Kilogram | Unit::Liter => Decimal::from(1000),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "gram",
            Unit::Kilogram => "kilogram",
            Unit::Milliliter => "milliliter",
            Unit::Liter => "liter",
            Unit::Piece => "piece",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Piece => "pc",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gram" => Ok(Unit::Gram),
            "kilogram" => Ok(Unit::Kilogram),
            "milliliter" => Ok(Unit::Milliliter),
            "liter" => Ok(Unit::Liter),
            "piece" => Ok(Unit::Piece),
            other => Err(ParseDomainError::Unit(other.to_string())),
        }
    }
}

/// Kinds of stock movements in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Inbound movement; always adds the magnitude to the balance.
    Entry,
    /// Outbound movement; always subtracts the magnitude from the balance.
    Exit,
    /// Free-form correction; the signed quantity is applied as given.
    Adjustment,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entry => "entry",
            MovementKind::Exit => "exit",
            MovementKind::Adjustment => "adjustment",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementKind {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" => Ok(MovementKind::Entry),
            "exit" => Ok(MovementKind::Exit),
            "adjustment" => Ok(MovementKind::Adjustment),
            other => Err(ParseDomainError::MovementKind(other.to_string())),
        }
    }
}

/// Lifecycle state of a recorded production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionState {
    Active,
    Voided,
}

impl ProductionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductionState::Active => "active",
            ProductionState::Voided => "voided",
        }
    }
}

impl fmt::Display for ProductionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductionState {
    type Err = ParseDomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(ProductionState::Active),
            "voided" => Ok(ProductionState::Voided),
            other => Err(ParseDomainError::ProductionState(other.to_string())),
        }
    }
}

/// Three-level classification of current stock against a minimum threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplenishmentStatus {
    Low,
    Warning,
    Ok,
}

/// Error for parsing domain enums persisted as text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseDomainError {
    #[error("unknown unit: {0}")]
    Unit(String),
    #[error("unknown movement kind: {0}")]
    MovementKind(String),
    #[error("unknown production state: {0}")]
    ProductionState(String),
}
