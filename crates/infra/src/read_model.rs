//! Page-shaped read models built from the newest-first product listing.

use lumina_catalog::{Category, Product, ProductView, SidebarSide};

/// Landing page layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StorefrontLayout {
    /// The hero slot holder; the newest product when the slot is vacant.
    pub hero: Option<ProductView>,
    pub sidebar_left: Vec<ProductView>,
    pub sidebar_right: Vec<ProductView>,
    /// Every product, newest first.
    pub grid: Vec<ProductView>,
}

impl StorefrontLayout {
    /// `listing` must already be newest-first.
    pub fn from_listing(listing: Vec<ProductView>) -> Self {
        let on_side = |side: SidebarSide| -> Vec<ProductView> {
            listing
                .iter()
                .filter(|v| v.product.sidebar_side() == Some(side))
                .cloned()
                .collect()
        };
        let sidebar_left = on_side(SidebarSide::Left);
        let sidebar_right = on_side(SidebarSide::Right);

        let hero = listing
            .iter()
            .find(|v| v.product.is_hero_highlight())
            .or_else(|| listing.first())
            .cloned();

        Self {
            hero,
            sidebar_left,
            sidebar_right,
            grid: listing,
        }
    }
}

/// Admin breakdown of products by placement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlacementOverview {
    pub hero: Vec<ProductView>,
    /// Sidebar holders that are not also the hero.
    pub sidebar: Vec<ProductView>,
    /// Products in no slot that pass the search filter.
    pub regular: Vec<ProductView>,
}

impl PlacementOverview {
    pub fn from_listing<F>(listing: Vec<ProductView>, search: F) -> Self
    where
        F: Fn(&Product) -> bool,
    {
        let mut overview = Self::default();
        for view in listing {
            let placement = view.product.placement;
            if placement.hero {
                overview.hero.push(view);
            } else if placement.sidebar.is_some() {
                overview.sidebar.push(view);
            } else if search(&view.product) {
                overview.regular.push(view);
            }
        }
        overview
    }
}

/// Products of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    pub category: Category,
    pub products: Vec<ProductView>,
}

impl Collection {
    /// Group `listing` under `categories` (kept in the given order). Empty
    /// categories are kept. With `only`, just the category of that name.
    pub fn group(
        categories: Vec<Category>,
        listing: Vec<ProductView>,
        only: Option<&str>,
    ) -> Vec<Collection> {
        categories
            .into_iter()
            .filter(|c| only.is_none_or(|name| c.name == name))
            .map(|category| {
                let products = listing
                    .iter()
                    .filter(|v| v.category.id == category.id)
                    .cloned()
                    .collect();
                Collection { category, products }
            })
            .collect()
    }
}
