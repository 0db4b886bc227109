//! Infrastructure layer: catalog storage, services and read models.

pub mod read_model;
pub mod seed;
pub mod services;
pub mod store;

pub use services::{
    CatalogError, CatalogQueryService, CatalogSettings, CreatorPolicy, PlacementService,
    SHOWCASE_USER_ID,
};
pub use store::{CatalogStore, InMemoryCatalogStore, PostgresCatalogStore, StoreError};
