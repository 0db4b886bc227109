//! Write path: category administration and product create/update/delete.
//!
//! Validation happens before the store is touched. The store then applies
//! slot release + row change as one unit; this service only retries that
//! unit when the store reports a concurrent-write conflict.

use chrono::Utc;
use tracing::{info, warn};

use lumina_catalog::{Category, Product, ProductInput, ProductView, validate_category_name};
use lumina_core::{CategoryId, ProductId, UserId};

use crate::store::{CatalogStore, ProductWrite, StoreError, WriteOutcome};

use super::error::CatalogError;
use super::settings::CatalogSettings;

pub struct PlacementService<S> {
    store: S,
    settings: CatalogSettings,
}

impl<S> PlacementService<S>
where
    S: CatalogStore,
{
    pub fn new(store: S, settings: CatalogSettings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    pub async fn create_category(&self, name: &str) -> Result<Category, CatalogError> {
        let category = Category::new(name)?;
        let category = self
            .store
            .insert_category(category)
            .await
            .map_err(CatalogError::from_write)?;
        info!(category_id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    pub async fn rename_category(
        &self,
        id: CategoryId,
        name: &str,
    ) -> Result<Category, CatalogError> {
        let name = validate_category_name(name)?;
        let category = self
            .store
            .rename_category(id, name)
            .await
            .map_err(CatalogError::from_write)?;
        info!(category_id = %category.id, name = %category.name, "category renamed");
        Ok(category)
    }

    /// Create a product, taking over any slot it claims.
    ///
    /// `actor` is the acting identity, if the caller context has one; the
    /// configured [`CreatorPolicy`](super::CreatorPolicy) decides what happens
    /// without it.
    pub async fn create_product(
        &self,
        input: ProductInput,
        actor: Option<UserId>,
    ) -> Result<ProductView, CatalogError> {
        let draft = input.validate()?;
        let created_by = self.settings.creator_policy.resolve(actor)?;

        let product = Product::create(ProductId::new(), draft, created_by, Utc::now());
        let outcome = self.write(ProductWrite::Insert(product)).await?;

        info!(
            product_id = %outcome.view.product.id,
            created_by = %created_by,
            "product created"
        );
        Ok(outcome.view)
    }

    /// Replace the mutable fields of a product.
    ///
    /// Slot release skips the product itself, so re-saving a held slot keeps it.
    pub async fn update_product(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<ProductView, CatalogError> {
        let draft = input.validate()?;
        let current = self
            .store
            .get_product(id)
            .await
            .map_err(CatalogError::from_read)?
            .ok_or(CatalogError::NotFound)?;

        let product = current.product.revise(draft);
        let outcome = self.write(ProductWrite::Update(product)).await?;

        info!(product_id = %id, "product updated");
        Ok(outcome.view)
    }

    /// Remove a product. Any slot it held becomes vacant.
    pub async fn delete_product(&self, id: ProductId) -> Result<(), CatalogError> {
        self.store
            .delete_product(id)
            .await
            .map_err(CatalogError::from_write)?;
        info!(product_id = %id, "product deleted");
        Ok(())
    }

    async fn write(&self, write: ProductWrite) -> Result<WriteOutcome, CatalogError> {
        let mut attempt = 0;
        loop {
            match self.store.write_product(write.clone()).await {
                Ok(outcome) => {
                    for release in &outcome.released {
                        info!(
                            slot = %release.slot,
                            from = %release.from,
                            to = %outcome.view.product.id,
                            "slot reassigned"
                        );
                    }
                    return Ok(outcome);
                }
                Err(StoreError::Conflict(msg)) if attempt < self.settings.write_retries => {
                    attempt += 1;
                    warn!(attempt, error = %msg, "product write conflicted; retrying");
                }
                Err(e) => return Err(CatalogError::from_write(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use lumina_catalog::{NameMatch, ProductFilter};

    use super::*;
    use crate::store::{InMemoryCatalogStore, StoreResult};

    /// Store that reports a conflict for the first `failures` writes.
    struct FlakyStore {
        inner: InMemoryCatalogStore,
        failures: u32,
        attempts: AtomicU32,
    }

    #[async_trait]
    impl CatalogStore for FlakyStore {
        async fn insert_category(&self, category: Category) -> StoreResult<Category> {
            self.inner.insert_category(category).await
        }

        async fn rename_category(&self, id: CategoryId, name: String) -> StoreResult<Category> {
            self.inner.rename_category(id, name).await
        }

        async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
            self.inner.get_category(id).await
        }

        async fn list_categories(&self) -> StoreResult<Vec<Category>> {
            self.inner.list_categories().await
        }

        async fn list_products(
            &self,
            filter: &ProductFilter,
            mode: NameMatch,
        ) -> StoreResult<Vec<ProductView>> {
            self.inner.list_products(filter, mode).await
        }

        async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductView>> {
            self.inner.get_product(id).await
        }

        async fn count_products(&self) -> StoreResult<u64> {
            self.inner.count_products().await
        }

        async fn write_product(&self, write: ProductWrite) -> StoreResult<WriteOutcome> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt < self.failures {
                return Err(StoreError::Conflict("simulated".to_string()));
            }
            self.inner.write_product(write).await
        }

        async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
            self.inner.delete_product(id).await
        }
    }

    fn flaky(failures: u32) -> Arc<FlakyStore> {
        Arc::new(FlakyStore {
            inner: InMemoryCatalogStore::new(),
            failures,
            attempts: AtomicU32::new(0),
        })
    }

    fn input(category_id: CategoryId) -> ProductInput {
        ProductInput {
            name: "Keystroke Pro".to_string(),
            description: "Mechanical".to_string(),
            price: Decimal::new(18950, 2),
            image: "i".to_string(),
            category_id,
            sidebar_side: None,
            is_hero_highlight: true,
            specifications: vec![],
        }
    }

    #[tokio::test]
    async fn conflicting_write_is_retried() {
        let store = flaky(2);
        let service = PlacementService::new(store.clone(), CatalogSettings::default());
        let category = service.create_category("Peripherals").await.unwrap();

        let view = service
            .create_product(input(category.id), None)
            .await
            .unwrap();
        assert!(view.product.is_hero_highlight());
        assert_eq!(store.attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn exhausted_retries_fail_the_write() {
        let store = flaky(10);
        let settings = CatalogSettings {
            write_retries: 1,
            ..CatalogSettings::default()
        };
        let service = PlacementService::new(store.clone(), settings);
        let category = service.create_category("Peripherals").await.unwrap();

        let err = service
            .create_product(input(category.id), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::WriteFailed(_)));
        assert_eq!(store.attempts.load(Ordering::SeqCst), 2);
        assert_eq!(store.count_products().await.unwrap(), 0);
    }
}
