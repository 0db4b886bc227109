//! Postgres-backed catalog store.
//!
//! ## Atomicity of product writes
//!
//! Every product write runs in one transaction that:
//! 1. Takes the placement advisory lock (`pg_advisory_xact_lock`), serializing
//!    slot-claiming writers against each other
//! 2. Checks the category exists and, for updates, that the row exists
//! 3. Releases the claimed slots from every other product
//! 4. Inserts/updates the row
//! 5. Commits
//!
//! Partial unique indexes (`products_single_hero`, `products_single_sidebar_side`)
//! enforce the single-occupant rule at the data layer as well. If they ever
//! fire, the write surfaces as [`StoreError::Conflict`] and is retried.
//!
//! ## Error Mapping
//!
//! | SQLSTATE | StoreError | Scenario |
//! |----------|------------|----------|
//! | `23505` on `categories_name_key` | `Duplicate` | category name taken |
//! | `23505` (other), `40001`, `40P01` | `Conflict` | concurrent slot claim, serialization failure, deadlock |
//! | `23503` | `InvalidReference` | category vanished mid-write |
//! | anything else | `Backend` | connectivity, pool closed, ... |

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgConnectOptions;
use sqlx::{FromRow, PgPool};
use tracing::{Span, instrument};
use uuid::Uuid;

use lumina_catalog::{
    Category, NameMatch, Placement, Price, Product, ProductFilter, ProductView, SidebarSide, Slot,
    SlotRelease, Specifications,
};
use lumina_core::{CategoryId, ProductId, UserId};

use super::{CatalogStore, ProductWrite, StoreError, StoreResult, WriteOutcome};

/// Advisory lock key shared by all slot-claiming writers.
const PLACEMENT_LOCK_KEY: i64 = 0x4c55_4d49_4e41;

const PRODUCT_SELECT: &str = r#"
    SELECT
        p.id,
        p.name,
        p.description,
        p.price,
        p.image,
        p.category_id,
        c.name AS category_name,
        p.specifications,
        p.is_hero_highlight,
        p.sidebar_side,
        p.created_by_id,
        p.created_at
    FROM products p
    JOIN categories c ON c.id = p.category_id
"#;

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
        }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    image: String,
    category_id: Uuid,
    category_name: String,
    specifications: Option<String>,
    is_hero_highlight: bool,
    sidebar_side: Option<String>,
    created_by_id: Uuid,
    created_at: DateTime<Utc>,
}

impl ProductRow {
    fn into_view(self) -> StoreResult<ProductView> {
        let price = Price::new(self.price)
            .map_err(|e| StoreError::Backend(format!("stored price for {}: {e}", self.id)))?;
        let sidebar = SidebarSide::parse_optional(self.sidebar_side.as_deref())
            .map_err(|e| StoreError::Backend(format!("stored sidebar side for {}: {e}", self.id)))?;

        let category = Category {
            id: CategoryId::from_uuid(self.category_id),
            name: self.category_name,
        };
        let product = Product {
            id: ProductId::from_uuid(self.id),
            name: self.name,
            description: self.description,
            price,
            image: self.image,
            category_id: category.id,
            specifications: Specifications::decode_or_empty(self.specifications.as_deref()),
            placement: Placement::new(self.is_hero_highlight, sidebar),
            created_by: UserId::from_uuid(self.created_by_id),
            created_at: self.created_at,
        };
        Ok(ProductView { product, category })
    }
}

/// Postgres catalog store.
///
/// `Send + Sync`; shares one SQLx connection pool.
#[derive(Debug, Clone)]
pub struct PostgresCatalogStore {
    pool: Arc<PgPool>,
}

impl PostgresCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Connect and apply the bundled migrations.
    pub async fn connect(database_url: &str) -> StoreResult<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| map_sqlx_error("connect", e))?;
        Self::connect_with(options).await
    }

    /// Like [`connect`](Self::connect), with explicit connection options
    /// (e.g. a non-default `search_path`).
    pub async fn connect_with(options: PgConnectOptions) -> StoreResult<Self> {
        let pool = PgPool::connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Backend(format!("migration failed: {e}")))?;
        Ok(Self::new(pool))
    }

    #[instrument(skip(self), fields(row_count = tracing::field::Empty), err)]
    pub async fn load_products(
        &self,
        filter: &ProductFilter,
        mode: NameMatch,
    ) -> StoreResult<Vec<ProductView>> {
        // `lower()` folds per database locale (ASCII only under C), so
        // case-insensitive matching happens here with `NameMatch` instead.
        let needle = match mode {
            NameMatch::CaseSensitive => filter.name_contains.as_deref(),
            NameMatch::CaseInsensitive => None,
        };
        let sql = format!(
            "{PRODUCT_SELECT}
            WHERE ($1::uuid IS NULL OR p.category_id = $1)
              AND ($2::text IS NULL OR strpos(p.name, $2) > 0)
            ORDER BY p.created_at DESC, p.id DESC"
        );

        let rows: Vec<ProductRow> = sqlx::query_as(&sql)
            .bind(filter.category_id.map(Uuid::from))
            .bind(needle)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;

        let mut views = rows
            .into_iter()
            .map(ProductRow::into_view)
            .collect::<StoreResult<Vec<_>>>()?;
        if mode == NameMatch::CaseInsensitive {
            views.retain(|v| filter.matches(&v.product, mode));
        }

        Span::current().record("row_count", views.len());
        Ok(views)
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    pub async fn load_product(&self, id: ProductId) -> StoreResult<Option<ProductView>> {
        let sql = format!("{PRODUCT_SELECT} WHERE p.id = $1");
        let row: Option<ProductRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?;
        row.map(ProductRow::into_view).transpose()
    }

    #[instrument(
        skip(self, write),
        fields(
            product_id = %write.product().id,
            placement = ?write.product().placement,
            released = tracing::field::Empty
        ),
        err
    )]
    pub async fn apply_write(&self, write: ProductWrite) -> StoreResult<WriteOutcome> {
        let incoming = write.product().clone();
        let id = *incoming.id.as_uuid();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_transaction", e))?;

        sqlx::query("SELECT pg_advisory_xact_lock($1)")
            .bind(PLACEMENT_LOCK_KEY)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("placement_lock", e))?;

        let category: Option<CategoryRow> =
            sqlx::query_as("SELECT id, name FROM categories WHERE id = $1 FOR SHARE")
                .bind(incoming.category_id.as_uuid())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("check_category", e))?;
        let Some(category) = category else {
            tx.rollback()
                .await
                .map_err(|e| map_sqlx_error("rollback", e))?;
            return Err(StoreError::InvalidReference(format!(
                "category {} does not exist",
                incoming.category_id
            )));
        };

        let existing: Option<(Uuid, DateTime<Utc>)> = sqlx::query_as(
            "SELECT created_by_id, created_at FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("check_product", e))?;

        match (&write, existing) {
            (ProductWrite::Insert(_), Some(_)) => {
                tx.rollback()
                    .await
                    .map_err(|e| map_sqlx_error("rollback", e))?;
                return Err(StoreError::Conflict(format!("product {id} already exists")));
            }
            (ProductWrite::Update(_), None) => {
                tx.rollback()
                    .await
                    .map_err(|e| map_sqlx_error("rollback", e))?;
                return Err(StoreError::NotFound);
            }
            _ => {}
        }

        let mut released = Vec::new();
        if incoming.placement.hero {
            let ids: Vec<Uuid> = sqlx::query_scalar(
                "UPDATE products SET is_hero_highlight = FALSE
                 WHERE is_hero_highlight AND id <> $1
                 RETURNING id",
            )
            .bind(id)
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("release_hero", e))?;
            released.extend(ids.into_iter().map(|from| SlotRelease {
                slot: Slot::Hero,
                from: ProductId::from_uuid(from),
            }));
        }
        if let Some(side) = incoming.placement.sidebar {
            let ids: Vec<Uuid> = sqlx::query_scalar(
                "UPDATE products SET sidebar_side = NULL
                 WHERE sidebar_side = $2 AND id <> $1
                 RETURNING id",
            )
            .bind(id)
            .bind(side.as_str())
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("release_sidebar", e))?;
            released.extend(ids.into_iter().map(|from| SlotRelease {
                slot: Slot::Sidebar(side),
                from: ProductId::from_uuid(from),
            }));
        }

        let stored = match existing {
            None => {
                sqlx::query(
                    r#"
                    INSERT INTO products (
                        id,
                        name,
                        description,
                        price,
                        image,
                        category_id,
                        specifications,
                        is_hero_highlight,
                        sidebar_side,
                        created_by_id,
                        created_at
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
                    "#,
                )
                .bind(id)
                .bind(&incoming.name)
                .bind(&incoming.description)
                .bind(incoming.price.amount())
                .bind(&incoming.image)
                .bind(incoming.category_id.as_uuid())
                .bind(incoming.specifications.encode())
                .bind(incoming.placement.hero)
                .bind(incoming.placement.sidebar.map(|s| s.as_str()))
                .bind(incoming.created_by.as_uuid())
                .bind(incoming.created_at)
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("insert_product", e))?;
                incoming
            }
            Some((created_by, created_at)) => {
                sqlx::query(
                    r#"
                    UPDATE products SET
                        name = $2,
                        description = $3,
                        price = $4,
                        image = $5,
                        category_id = $6,
                        specifications = $7,
                        is_hero_highlight = $8,
                        sidebar_side = $9
                    WHERE id = $1
                    "#,
                )
                .bind(id)
                .bind(&incoming.name)
                .bind(&incoming.description)
                .bind(incoming.price.amount())
                .bind(&incoming.image)
                .bind(incoming.category_id.as_uuid())
                .bind(incoming.specifications.encode())
                .bind(incoming.placement.hero)
                .bind(incoming.placement.sidebar.map(|s| s.as_str()))
                .execute(&mut *tx)
                .await
                .map_err(|e| map_sqlx_error("update_product", e))?;
                Product {
                    created_by: UserId::from_uuid(created_by),
                    created_at,
                    ..incoming
                }
            }
        };

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_transaction", e))?;

        Span::current().record("released", released.len());
        Ok(WriteOutcome {
            view: ProductView {
                product: stored,
                category: category.into(),
            },
            released,
        })
    }
}

#[async_trait]
impl CatalogStore for PostgresCatalogStore {
    async fn insert_category(&self, category: Category) -> StoreResult<Category> {
        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(category.id.as_uuid())
            .bind(&category.name)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_category", e))?;
        Ok(category)
    }

    async fn rename_category(&self, id: CategoryId, name: String) -> StoreResult<Category> {
        let row: Option<CategoryRow> =
            sqlx::query_as("UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name")
                .bind(id.as_uuid())
                .bind(&name)
                .fetch_optional(&*self.pool)
                .await
                .map_err(|e| map_sqlx_error("rename_category", e))?;
        row.map(Category::from).ok_or(StoreError::NotFound)
    }

    async fn get_category(&self, id: CategoryId) -> StoreResult<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as("SELECT id, name FROM categories WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_category", e))?;
        Ok(row.map(Category::from))
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows: Vec<CategoryRow> = sqlx::query_as("SELECT id, name FROM categories ORDER BY name ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_categories", e))?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn list_products(
        &self,
        filter: &ProductFilter,
        mode: NameMatch,
    ) -> StoreResult<Vec<ProductView>> {
        self.load_products(filter, mode).await
    }

    async fn get_product(&self, id: ProductId) -> StoreResult<Option<ProductView>> {
        self.load_product(id).await
    }

    async fn count_products(&self) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_products", e))?;
        Ok(count.max(0) as u64)
    }

    async fn write_product(&self, write: ProductWrite) -> StoreResult<WriteOutcome> {
        self.apply_write(write).await
    }

    async fn delete_product(&self, id: ProductId) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());
            match db_err.code().as_deref() {
                Some("23505") if db_err.constraint() == Some("categories_name_key") => {
                    StoreError::Duplicate(msg)
                }
                Some("23505") | Some("40001") | Some("40P01") => StoreError::Conflict(msg),
                Some("23503") => StoreError::InvalidReference(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::Backend(format!("connection pool closed in {}", operation))
        }
        _ => StoreError::Backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

/// Run with `DATABASE_URL=postgres://... cargo test -p lumina-infra -- --ignored`.
/// Each test migrates its own throwaway schema, so they can run in parallel.
#[cfg(test)]
mod tests {
    use lumina_catalog::ProductInput;

    use super::*;
    use crate::services::{
        CatalogError, CatalogQueryService, CatalogSettings, PlacementService,
    };

    type Shared = Arc<PostgresCatalogStore>;

    struct TestDb {
        admin: PgPool,
        schema: String,
        store: Shared,
    }

    impl TestDb {
        async fn new() -> Self {
            let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
            let admin = PgPool::connect(&url).await.unwrap();
            let schema = format!("lumina_test_{}", Uuid::now_v7().simple());
            sqlx::query(&format!("CREATE SCHEMA {schema}"))
                .execute(&admin)
                .await
                .unwrap();

            let options = PgConnectOptions::from_str(&url)
                .unwrap()
                .options([("search_path", schema.as_str())]);
            let store = PostgresCatalogStore::connect_with(options).await.unwrap();

            Self {
                admin,
                schema,
                store: Arc::new(store),
            }
        }

        fn placement(&self) -> PlacementService<Shared> {
            PlacementService::new(self.store.clone(), CatalogSettings::default())
        }

        fn query(&self, mode: NameMatch) -> CatalogQueryService<Shared> {
            CatalogQueryService::new(self.store.clone(), mode)
        }

        async fn drop_schema(self) {
            self.store.pool.close().await;
            sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.schema))
                .execute(&self.admin)
                .await
                .unwrap();
        }
    }

    fn input(name: &str, category_id: CategoryId) -> ProductInput {
        ProductInput {
            name: name.to_string(),
            description: "d".to_string(),
            price: Decimal::new(1999, 2),
            image: "i".to_string(),
            category_id,
            sidebar_side: None,
            is_hero_highlight: false,
            specifications: vec![],
        }
    }

    fn hero(name: &str, category_id: CategoryId) -> ProductInput {
        ProductInput {
            is_hero_highlight: true,
            ..input(name, category_id)
        }
    }

    async fn holders(store: &Shared) -> (usize, usize, usize) {
        let all = store
            .list_products(&ProductFilter::all(), NameMatch::CaseSensitive)
            .await
            .unwrap();
        let on_side = |side| {
            all.iter()
                .filter(|v| v.product.sidebar_side() == Some(side))
                .count()
        };
        (
            all.iter().filter(|v| v.product.is_hero_highlight()).count(),
            on_side(SidebarSide::Left),
            on_side(SidebarSide::Right),
        )
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn created_at_reads_back_unchanged() {
        let db = TestDb::new().await;
        let placement = db.placement();
        let category = placement.create_category("Audio").await.unwrap();

        let created = placement.create_product(input("Sonic", category.id), None).await.unwrap();
        let read = db.store.get_product(created.product.id).await.unwrap().unwrap();
        assert_eq!(read.product.created_at, created.product.created_at);
        assert_eq!(read.product, created.product);

        db.drop_schema().await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ignore = "requires DATABASE_URL"]
    async fn concurrent_claims_leave_one_holder_per_slot() {
        let db = TestDb::new().await;
        let placement = Arc::new(db.placement());
        let category_id = placement.create_category("Audio").await.unwrap().id;

        let mut handles = Vec::new();
        for i in 0..24 {
            let placement = placement.clone();
            handles.push(tokio::spawn(async move {
                let raw = ProductInput {
                    sidebar_side: Some(if i % 2 == 0 { SidebarSide::Left } else { SidebarSide::Right }),
                    ..hero(&format!("Contender {i}"), category_id)
                };
                placement.create_product(raw, None).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(db.store.count_products().await.unwrap(), 24);
        assert_eq!(holders(&db.store).await, (1, 1, 1));

        db.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn resaving_the_hero_keeps_it() {
        let db = TestDb::new().await;
        let placement = db.placement();
        let category = placement.create_category("Audio").await.unwrap();
        let other = placement.create_product(input("Other", category.id), None).await.unwrap();
        let star = placement.create_product(hero("Star", category.id), None).await.unwrap();

        let updated = placement
            .update_product(star.product.id, hero("Star v2", category.id))
            .await
            .unwrap();
        assert!(updated.product.is_hero_highlight());
        assert_eq!(updated.product.created_at, star.product.created_at);
        assert_eq!(holders(&db.store).await, (1, 0, 0));

        let outcome = db
            .store
            .write_product(ProductWrite::Update(
                other.product.revise(hero("Other", category.id).validate().unwrap()),
            ))
            .await
            .unwrap();
        assert_eq!(outcome.released.len(), 1);
        assert_eq!(outcome.released[0].from, star.product.id);
        assert_eq!(holders(&db.store).await, (1, 0, 0));

        db.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn specifications_persist_and_corrupt_blobs_read_as_empty() {
        let db = TestDb::new().await;
        let placement = db.placement();
        let category = placement.create_category("Audio").await.unwrap();

        let mut raw = input("Specced", category.id);
        raw.specifications = vec!["IP67".to_string(), "  ".to_string(), "8h battery".to_string()];
        let specced = placement.create_product(raw, None).await.unwrap();
        let plain = placement.create_product(input("Plain", category.id), None).await.unwrap();

        let read = db.store.get_product(specced.product.id).await.unwrap().unwrap();
        assert_eq!(read.product.specifications.entries(), ["IP67", "8h battery"]);

        let stored: Option<String> =
            sqlx::query_scalar("SELECT specifications FROM products WHERE id = $1")
                .bind(plain.product.id.as_uuid())
                .fetch_one(&*db.store.pool)
                .await
                .unwrap();
        assert_eq!(stored, None);

        sqlx::query("UPDATE products SET specifications = '{not json' WHERE id = $1")
            .bind(specced.product.id.as_uuid())
            .execute(&*db.store.pool)
            .await
            .unwrap();
        let read = db.store.get_product(specced.product.id).await.unwrap().unwrap();
        assert!(read.product.specifications.is_empty());
        assert_eq!(read.product.name, "Specced");

        db.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn database_errors_map_to_store_errors() {
        let db = TestDb::new().await;
        let placement = db.placement();
        let category = placement.create_category("Audio").await.unwrap();

        let err = placement.create_category("Audio").await.unwrap_err();
        assert!(matches!(err, CatalogError::Conflict(_)));

        let err = placement
            .create_product(input("Orphan", CategoryId::new()), None)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidReference(_)));
        assert_eq!(db.store.count_products().await.unwrap(), 0);

        // Foreign key violation raised by the database itself.
        let err = sqlx::query(
            "INSERT INTO products (id, name, description, price, image, category_id, created_by_id)
             VALUES ($1, 'x', 'd', 1, 'i', $2, $3)",
        )
        .bind(Uuid::now_v7())
        .bind(Uuid::now_v7())
        .bind(Uuid::now_v7())
        .execute(&*db.store.pool)
        .await
        .unwrap_err();
        assert!(matches!(
            map_sqlx_error("insert_product", err),
            StoreError::InvalidReference(_)
        ));

        // A second hero bypassing the release step trips the partial unique index.
        placement.create_product(hero("Star", category.id), None).await.unwrap();
        let rival = placement.create_product(input("Rival", category.id), None).await.unwrap();
        let err = sqlx::query("UPDATE products SET is_hero_highlight = TRUE WHERE id = $1")
            .bind(rival.product.id.as_uuid())
            .execute(&*db.store.pool)
            .await
            .unwrap_err();
        assert!(matches!(
            map_sqlx_error("update_product", err),
            StoreError::Conflict(_)
        ));

        db.drop_schema().await;
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn name_search_follows_the_match_mode() {
        let db = TestDb::new().await;
        let placement = db.placement();
        let audio = placement.create_category("Audio").await.unwrap();
        let gaming = placement.create_category("Gaming").await.unwrap();
        placement.create_product(input("Sonic A1", audio.id), None).await.unwrap();
        placement.create_product(input("ÉCRAN Pro", gaming.id), None).await.unwrap();

        let sensitive = db.query(NameMatch::CaseSensitive);
        let insensitive = db.query(NameMatch::CaseInsensitive);
        let names = |views: Vec<ProductView>| -> Vec<String> {
            views.into_iter().map(|v| v.product.name).collect()
        };

        let found = sensitive.list_products(&ProductFilter::all().name_contains("Sonic")).await.unwrap();
        assert_eq!(names(found), ["Sonic A1"]);
        let found = sensitive.list_products(&ProductFilter::all().name_contains("sonic")).await.unwrap();
        assert!(found.is_empty());

        let found = insensitive.list_products(&ProductFilter::all().name_contains("écran")).await.unwrap();
        assert_eq!(names(found), ["ÉCRAN Pro"]);

        let found = insensitive
            .list_products(&ProductFilter::all().in_category(audio.id).name_contains("écran"))
            .await
            .unwrap();
        assert!(found.is_empty());

        db.drop_schema().await;
    }
}
