use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lumina_catalog::{Category, ProductFilter, ProductInput, ProductView, SidebarSide};
use lumina_core::{CategoryId, ProductId, UserId};
use lumina_infra::read_model::{Collection, PlacementOverview, StorefrontLayout};
use lumina_infra::CatalogError;

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /products` and `PUT /products/:id`.
///
/// Omitted placement fields mean "not placed"; omitted specifications mean none.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category_id: String,
    #[serde(default)]
    pub sidebar_side: Option<String>,
    #[serde(default)]
    pub is_hero_highlight: bool,
    #[serde(default)]
    pub specifications: Vec<String>,
}

impl ProductRequest {
    pub fn into_input(self) -> Result<ProductInput, axum::response::Response> {
        let category_id: CategoryId = self
            .category_id
            .parse()
            .map_err(|e: lumina_core::DomainError| {
                errors::catalog_error_to_response(CatalogError::from(e))
            })?;
        let sidebar_side = SidebarSide::parse_optional(self.sidebar_side.as_deref())
            .map_err(|e| errors::catalog_error_to_response(CatalogError::from(e)))?;

        Ok(ProductInput {
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            category_id,
            sidebar_side,
            is_hero_highlight: self.is_hero_highlight,
            specifications: self.specifications,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    pub category_id: Option<String>,
    pub search: Option<String>,
}

impl ListProductsQuery {
    pub fn into_filter(self) -> Result<ProductFilter, axum::response::Response> {
        let mut filter = ProductFilter::all();
        if let Some(raw) = self.category_id.filter(|s| !s.trim().is_empty()) {
            let category_id: CategoryId = raw.parse().map_err(|_| errors::invalid_id("category"))?;
            filter = filter.in_category(category_id);
        }
        if let Some(search) = self.search {
            filter = filter.name_contains(search);
        }
        Ok(filter)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CollectionsQuery {
    pub category: Option<String>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category_id: CategoryId,
    pub category: Category,
    pub specifications: Vec<String>,
    pub is_hero_highlight: bool,
    pub sidebar_side: Option<SidebarSide>,
    pub created_by_id: UserId,
    pub created_at: DateTime<Utc>,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        let ProductView { product, category } = view;
        Self {
            id: product.id,
            is_hero_highlight: product.is_hero_highlight(),
            sidebar_side: product.sidebar_side(),
            name: product.name,
            description: product.description,
            price: product.price.amount(),
            image: product.image,
            category_id: product.category_id,
            category,
            specifications: product.specifications.into_entries(),
            created_by_id: product.created_by,
            created_at: product.created_at,
        }
    }
}

pub fn products(views: Vec<ProductView>) -> Vec<ProductResponse> {
    views.into_iter().map(ProductResponse::from).collect()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorefrontResponse {
    pub hero: Option<ProductResponse>,
    pub sidebar_left: Vec<ProductResponse>,
    pub sidebar_right: Vec<ProductResponse>,
    pub grid: Vec<ProductResponse>,
}

impl From<StorefrontLayout> for StorefrontResponse {
    fn from(layout: StorefrontLayout) -> Self {
        Self {
            hero: layout.hero.map(ProductResponse::from),
            sidebar_left: products(layout.sidebar_left),
            sidebar_right: products(layout.sidebar_right),
            grid: products(layout.grid),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PlacementsResponse {
    pub hero: Vec<ProductResponse>,
    pub sidebar: Vec<ProductResponse>,
    pub regular: Vec<ProductResponse>,
}

impl From<PlacementOverview> for PlacementsResponse {
    fn from(overview: PlacementOverview) -> Self {
        Self {
            hero: products(overview.hero),
            sidebar: products(overview.sidebar),
            regular: products(overview.regular),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub category: Category,
    pub products: Vec<ProductResponse>,
}

impl From<Collection> for CollectionResponse {
    fn from(collection: Collection) -> Self {
        Self {
            category: collection.category,
            products: products(collection.products),
        }
    }
}
