//! Page-shaped reads: landing page, admin placement breakdown, collections.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    Json,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub async fn storefront(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.query.storefront().await {
        Ok(layout) => Json(dto::StorefrontResponse::from(layout)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn placements(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SearchQuery>,
) -> axum::response::Response {
    match services.query.placements_overview(query.search.as_deref()).await {
        Ok(overview) => Json(dto::PlacementsResponse::from(overview)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn collections(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::CollectionsQuery>,
) -> axum::response::Response {
    match services.query.collections(query.category.as_deref()).await {
        Ok(collections) => Json(
            collections
                .into_iter()
                .map(dto::CollectionResponse::from)
                .collect::<Vec<_>>(),
        )
        .into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
