//! Catalog store boundary.
//!
//! The store is the single shared mutable resource. Every product write is
//! one atomic unit: referential checks, slot release on other products and
//! the row insert/replace either all happen or none do.

pub mod in_memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use lumina_catalog::{Category, NameMatch, Product, ProductFilter, ProductView, SlotRelease};
use lumina_core::{CategoryId, ProductId};

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;

/// Store operation error.
///
/// These are infrastructure outcomes; the service layer maps them onto the
/// catalog error taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    /// A foreign key does not resolve (e.g. unknown category).
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A unique value is already taken (e.g. category name).
    #[error("duplicate: {0}")]
    Duplicate(String),

    /// A concurrent write got in the way; the unit was rolled back and may be retried.
    #[error("write conflict: {0}")]
    Conflict(String),

    #[error("backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A product row change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductWrite {
    /// New row; the id must not exist yet.
    Insert(Product),
    /// Replace the mutable fields of an existing row.
    Update(Product),
}

impl ProductWrite {
    pub fn product(&self) -> &Product {
        match self {
            ProductWrite::Insert(p) | ProductWrite::Update(p) => p,
        }
    }
}

/// Result of a committed product write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOutcome {
    pub view: ProductView,
    /// Slots taken away from other products by this write.
    pub released: Vec<SlotRelease>,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn insert_category(&self, category: Category) -> StoreResult<Category>;

    async fn rename_category(&self, id: CategoryId, name: String) -> StoreResult<Category>;

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>>;

    /// All categories, ascending by name.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Matching products joined with their category, newest first.
    async fn list_products(
        &self,
        filter: &ProductFilter,
        mode: NameMatch,
    ) -> StoreResult<Vec<ProductView>>;

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductView>>;

    async fn count_products(&self) -> StoreResult<u64>;

    /// Apply a product write atomically, releasing the slots it claims from
    /// every other product.
    async fn write_product(&self, write: ProductWrite) -> StoreResult<WriteOutcome>;

    async fn delete_product(&self, id: ProductId) -> StoreResult<()>;
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn insert_category(&self, category: Category) -> StoreResult<Category> {
        (**self).insert_category(category).await
    }

    async fn rename_category(&self, id: CategoryId, name: String) -> StoreResult<Category> {
        (**self).rename_category(id, name).await
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        (**self).get_category(id).await
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        (**self).list_categories().await
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        mode: NameMatch,
    ) -> StoreResult<Vec<ProductView>> {
        (**self).list_products(filter, mode).await
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductView>> {
        (**self).get_product(id).await
    }

    async fn count_products(&self) -> StoreResult<u64> {
        (**self).count_products().await
    }

    async fn write_product(&self, write: ProductWrite) -> StoreResult<WriteOutcome> {
        (**self).write_product(write).await
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        (**self).delete_product(id).await
    }
}
