//! Business logic services for the Food Production Inventory Platform

pub mod ingredient;
pub mod inventory;
pub mod production;
pub mod purchase;
pub mod recipe;
pub mod supplier;

pub use ingredient::IngredientService;
pub use inventory::InventoryService;
pub use production::ProductionService;
pub use purchase::PurchaseService;
pub use recipe::RecipeService;
pub use supplier::SupplierService;
