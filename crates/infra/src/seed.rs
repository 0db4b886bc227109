//! Demo catalog for showcase deployments.

use rust_decimal::Decimal;
use tracing::info;

use lumina_catalog::{Category, ProductInput};

use crate::services::{CatalogError, PlacementService, SHOWCASE_USER_ID};
use crate::store::CatalogStore;

const CATEGORIES: [&str; 4] = ["Audio", "Peripherals", "Wearables", "Gaming"];

struct DemoProduct {
    name: &'static str,
    description: &'static str,
    /// Price in cents.
    price: i64,
    image: &'static str,
    category: &'static str,
}

const PRODUCTS: [DemoProduct; 4] = [
    DemoProduct {
        name: "Sonic A1 | Open Ear",
        description: "Ultimate transparency with high-fidelity sound. Bone conduction technology for the modern athlete.",
        price: 29999,
        image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?auto=format&fit=crop&q=80&w=800",
        category: "Audio",
    },
    DemoProduct {
        name: "Keystroke Pro | Mechanical",
        description: "Unmatched tactile feedback with customizable RGB and aluminum housing.",
        price: 18950,
        image: "https://images.unsplash.com/photo-1511467687858-23d96c32e4ae?auto=format&fit=crop&q=80&w=800",
        category: "Peripherals",
    },
    DemoProduct {
        name: "Lumina Watch Series 4",
        description: "The most advanced health tracking in a stunning titanium body.",
        price: 44900,
        image: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?auto=format&fit=crop&q=80&w=800",
        category: "Wearables",
    },
    DemoProduct {
        name: "Pixel Mouse | Precision",
        description: "Zero latency wireless gaming mouse with 24k DPI sensor.",
        price: 7999,
        image: "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?auto=format&fit=crop&q=80&w=800",
        category: "Peripherals",
    },
];

/// What a seeding run created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub categories: usize,
    pub products: usize,
}

/// Seed the demo catalog. Does nothing when products already exist;
/// categories that already exist (by name) are reused.
pub async fn seed_demo_catalog<S>(service: &PlacementService<S>) -> Result<SeedReport, CatalogError>
where
    S: CatalogStore,
{
    let store = service.store();
    if store.count_products().await.map_err(CatalogError::from_read)? > 0 {
        info!("catalog already populated; skipping seed");
        return Ok(SeedReport::default());
    }

    let mut report = SeedReport::default();
    let mut categories: Vec<Category> = store.list_categories().await.map_err(CatalogError::from_read)?;
    for name in CATEGORIES {
        if categories.iter().all(|c| c.name != name) {
            categories.push(service.create_category(name).await?);
            report.categories += 1;
        }
    }

    for demo in &PRODUCTS {
        let Some(category) = categories.iter().find(|c| c.name == demo.category) else {
            continue;
        };
        let input = ProductInput {
            name: demo.name.to_string(),
            description: demo.description.to_string(),
            price: Decimal::new(demo.price, 2),
            image: demo.image.to_string(),
            category_id: category.id,
            sidebar_side: None,
            is_hero_highlight: false,
            specifications: Vec::new(),
        };
        service.create_product(input, Some(SHOWCASE_USER_ID)).await?;
        report.products += 1;
    }

    info!(
        categories = report.categories,
        products = report.products,
        "demo catalog seeded"
    );
    Ok(report)
}
