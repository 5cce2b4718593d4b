//! Shared domain core for the Food Production Inventory Platform
//!
//! This crate contains the pure parts of the inventory domain: measurement
//! units and conversion, the replenishment policy, and the ledger arithmetic
//! used by the backend services. It has no I/O and no database types.

pub mod rules;
pub mod types;
pub mod units;

pub use rules::*;
pub use types::*;
pub use units::*;
