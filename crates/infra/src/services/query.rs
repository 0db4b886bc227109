//! Read path: listings, single lookups and page-shaped read models.
//!
//! Reads never block writes; a read racing a write sees either the state
//! before it or after it.

use lumina_catalog::{Category, NameMatch, ProductFilter, ProductView};
use lumina_core::ProductId;

use crate::read_model::{Collection, PlacementOverview, StorefrontLayout};
use crate::store::CatalogStore;

use super::error::CatalogError;

pub struct CatalogQueryService<S> {
    store: S,
    name_match: NameMatch,
}

impl<S> CatalogQueryService<S>
where
    S: CatalogStore,
{
    pub fn new(store: S, name_match: NameMatch) -> Self {
        Self { store, name_match }
    }

    pub fn name_match(&self) -> NameMatch {
        self.name_match
    }

    /// Products matching `filter`, joined with their category, newest first.
    /// An empty result is not an error.
    pub async fn list_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductView>, CatalogError> {
        self.store
            .list_products(filter, self.name_match)
            .await
            .map_err(CatalogError::from_read)
    }

    pub async fn get_product(&self, id: ProductId) -> Result<ProductView, CatalogError> {
        self.store
            .get_product(id)
            .await
            .map_err(CatalogError::from_read)?
            .ok_or(CatalogError::NotFound)
    }

    /// All categories, ascending by name.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        self.store
            .list_categories()
            .await
            .map_err(CatalogError::from_read)
    }

    pub async fn storefront(&self) -> Result<StorefrontLayout, CatalogError> {
        let listing = self.list_products(&ProductFilter::all()).await?;
        Ok(StorefrontLayout::from_listing(listing))
    }

    pub async fn placements_overview(
        &self,
        name_contains: Option<&str>,
    ) -> Result<PlacementOverview, CatalogError> {
        let listing = self.list_products(&ProductFilter::all()).await?;
        let search = ProductFilter {
            category_id: None,
            name_contains: name_contains.map(str::to_string),
        };
        Ok(PlacementOverview::from_listing(listing, |p| {
            search.matches(p, self.name_match)
        }))
    }

    pub async fn collections(
        &self,
        category_name: Option<&str>,
    ) -> Result<Vec<Collection>, CatalogError> {
        let categories = self.list_categories().await?;
        let listing = self.list_products(&ProductFilter::all()).await?;
        Ok(Collection::group(categories, listing, category_name))
    }
}
