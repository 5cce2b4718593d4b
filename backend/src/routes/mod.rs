//! Route definitions for the Food Production Inventory Platform

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - ingredient catalog
        .nest("/ingredients", ingredient_routes())
        // Protected routes - supplier catalog
        .nest("/suppliers", supplier_routes())
        // Protected routes - recipes and production
        .nest("/recipes", recipe_routes())
        .nest("/productions", production_routes())
        // Protected routes - purchases
        .nest("/purchases", purchase_routes())
        // Protected routes - stock ledger
        .nest("/inventory", inventory_routes())
}

/// Ingredient catalog routes (protected)
fn ingredient_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_ingredients).post(handlers::create_ingredient))
        .route(
            "/:ingredient_id",
            get(handlers::get_ingredient).put(handlers::update_ingredient),
        )
        .route("/:ingredient_id/stock", get(handlers::get_stock))
        .route("/:ingredient_id/stock/minimum", put(handlers::set_minimum_stock))
        .route("/:ingredient_id/purchases", get(handlers::get_price_history))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Supplier catalog routes (protected)
fn supplier_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_suppliers).post(handlers::create_supplier))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Recipe routes (protected)
fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_recipes).post(handlers::create_recipe))
        .route("/:recipe_id", get(handlers::get_recipe))
        .route("/:recipe_id/produce", post(handlers::produce_recipe))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Production routes (protected)
fn production_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_productions))
        .route("/summary", get(handlers::production_summary))
        .route("/:production_id/void", post(handlers::void_production))
        .route("/:production_id/edit", post(handlers::edit_production))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Purchase routes (protected)
fn purchase_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_purchases).post(handlers::register_purchase))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock ledger routes (protected)
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/movements", get(handlers::list_movements).post(handlers::record_movement))
        .route("/alerts", get(handlers::stock_alerts))
        .route_layer(middleware::from_fn(auth_middleware))
}
