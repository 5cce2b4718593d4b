//! HTTP handlers for the Food Production Inventory Platform

pub mod health;
pub mod ingredient;
pub mod inventory;
pub mod production;
pub mod purchase;
pub mod recipe;
pub mod supplier;

pub use health::*;
pub use ingredient::*;
pub use inventory::*;
pub use production::*;
pub use purchase::*;
pub use recipe::*;
pub use supplier::*;
