//! Catalog domain module.
//!
//! This crate contains business rules for categories, products and their
//! placement slots, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod category;
pub mod placement;
pub mod product;
pub mod specifications;

pub use category::{Category, validate_category_name};
pub use placement::{Placement, SidebarSide, Slot, SlotRelease, release_conflicts};
pub use product::{
    NameMatch, Price, Product, ProductDraft, ProductFilter, ProductInput, ProductView,
};
pub use specifications::{DecodeError, Specifications};
