use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use lumina_catalog::{
    Category, NameMatch, Product, ProductFilter, ProductView, release_conflicts,
};
use lumina_core::{CategoryId, ProductId};

use super::{CatalogStore, ProductWrite, StoreError, StoreResult, WriteOutcome};

#[derive(Debug, Default)]
struct Catalog {
    categories: HashMap<CategoryId, Category>,
    products: HashMap<ProductId, Product>,
}

impl Catalog {
    fn view(&self, product: &Product) -> Option<ProductView> {
        self.categories.get(&product.category_id).map(|category| ProductView {
            product: product.clone(),
            category: category.clone(),
        })
    }

    fn name_taken(&self, name: &str, except: Option<CategoryId>) -> bool {
        self.categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }
}

/// In-memory catalog store.
///
/// Intended for tests/dev. A single lock guards the whole catalog, so each
/// write (slot release + row change) is applied while no reader or other
/// writer can observe an intermediate state.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    inner: RwLock<Catalog>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Catalog>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, Catalog>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert_category(&self, category: Category) -> StoreResult<Category> {
        let mut catalog = self.write()?;
        if catalog.name_taken(&category.name, None) {
            return Err(StoreError::Duplicate(format!(
                "category name '{}' already exists",
                category.name
            )));
        }
        catalog.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn rename_category(&self, id: CategoryId, name: String) -> StoreResult<Category> {
        let mut catalog = self.write()?;
        if catalog.name_taken(&name, Some(id)) {
            return Err(StoreError::Duplicate(format!(
                "category name '{name}' already exists"
            )));
        }
        let category = catalog.categories.get_mut(&id).ok_or(StoreError::NotFound)?;
        category.name = name;
        Ok(category.clone())
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        Ok(self.read()?.categories.get(&id).cloned())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let mut categories: Vec<Category> = self.read()?.categories.values().cloned().collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        mode: NameMatch,
    ) -> StoreResult<Vec<ProductView>> {
        let catalog = self.read()?;
        let mut views: Vec<ProductView> = catalog
            .products
            .values()
            .filter(|p| filter.matches(p, mode))
            .filter_map(|p| catalog.view(p))
            .collect();

        views.sort_by(|a, b| {
            b.product
                .created_at
                .cmp(&a.product.created_at)
                .then_with(|| b.product.id.cmp(&a.product.id))
        });
        Ok(views)
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductView>> {
        let catalog = self.read()?;
        Ok(catalog.products.get(&id).and_then(|p| catalog.view(p)))
    }

    async fn count_products(&self) -> StoreResult<u64> {
        Ok(self.read()?.products.len() as u64)
    }

    async fn write_product(&self, write: ProductWrite) -> StoreResult<WriteOutcome> {
        let mut catalog = self.write()?;
        let product = write.product();

        // Checks first: nothing is touched unless the whole unit can apply.
        let category = catalog
            .categories
            .get(&product.category_id)
            .cloned()
            .ok_or_else(|| {
                StoreError::InvalidReference(format!("category {} does not exist", product.category_id))
            })?;

        let exists = catalog.products.contains_key(&product.id);
        match &write {
            ProductWrite::Insert(p) if exists => {
                return Err(StoreError::Conflict(format!("product {} already exists", p.id)));
            }
            ProductWrite::Update(_) if !exists => return Err(StoreError::NotFound),
            _ => {}
        }

        let released = release_conflicts(catalog.products.values_mut(), product);

        let product = match write {
            ProductWrite::Insert(p) => p,
            // Creation metadata is immutable.
            ProductWrite::Update(p) => match catalog.products.get(&p.id) {
                Some(existing) => Product {
                    created_by: existing.created_by,
                    created_at: existing.created_at,
                    ..p
                },
                None => p,
            },
        };
        catalog.products.insert(product.id, product.clone());

        Ok(WriteOutcome {
            view: ProductView { product, category },
            released,
        })
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let mut catalog = self.write()?;
        catalog
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}
