use axum::{routing::get, Router};

pub mod categories;
pub mod products;
pub mod storefront;
pub mod system;

/// Router for all catalog endpoints (identity context required).
pub fn router() -> Router {
    Router::new()
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .route("/storefront", get(storefront::storefront))
        .route("/admin/placements", get(storefront::placements))
        .route("/collections", get(storefront::collections))
}
