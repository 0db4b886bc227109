//! Catalog services: the write path (placement) and the read path (queries).

pub mod error;
pub mod placement;
pub mod query;
pub mod settings;

pub use error::CatalogError;
pub use placement::PlacementService;
pub use query::CatalogQueryService;
pub use settings::{CatalogSettings, CreatorPolicy, SHOWCASE_USER_ID};
