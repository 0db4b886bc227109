use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use lumina_core::{CategoryId, DomainError, Entity, ProductId, UserId, ValueObject};

use crate::category::Category;
use crate::placement::{Placement, SidebarSide};
use crate::specifications::Specifications;

/// Non-negative decimal price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl ValueObject for Price {}

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount < Decimal::ZERO {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Raw create/update input, as received from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub category_id: CategoryId,
    pub sidebar_side: Option<SidebarSide>,
    pub is_hero_highlight: bool,
    pub specifications: Vec<String>,
}

impl ProductInput {
    /// Validate into the mutable field set of a product.
    ///
    /// Category existence is not checked here (that needs the store).
    pub fn validate(self) -> Result<ProductDraft, DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description cannot be empty"));
        }
        let price = Price::new(self.price)?;

        Ok(ProductDraft {
            name: self.name,
            description: self.description,
            price,
            image: self.image,
            category_id: self.category_id,
            placement: Placement::new(self.is_hero_highlight, self.sidebar_side),
            specifications: Specifications::from_entries(self.specifications),
        })
    }
}

/// Validated mutable fields of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category_id: CategoryId,
    pub placement: Placement,
    pub specifications: Specifications,
}

/// A catalog product.
///
/// `id`, `created_by` and `created_at` are fixed at creation; everything else
/// is replaced wholesale by [`Product::revise`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category_id: CategoryId,
    pub specifications: Specifications,
    pub placement: Placement,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// `created_at` is kept at microsecond precision, the resolution of the
    /// persisted timestamp, so it reads back unchanged from any store.
    pub fn create(
        id: ProductId,
        draft: ProductDraft,
        created_by: UserId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image: draft.image,
            category_id: draft.category_id,
            specifications: draft.specifications,
            placement: draft.placement,
            created_by,
            created_at: created_at.trunc_subsecs(6),
        }
    }

    /// Apply an update, keeping identity and creation metadata.
    pub fn revise(&self, draft: ProductDraft) -> Self {
        Self::create(self.id, draft, self.created_by, self.created_at)
    }

    pub fn is_hero_highlight(&self) -> bool {
        self.placement.hero
    }

    pub fn sidebar_side(&self) -> Option<SidebarSide> {
        self.placement.sidebar
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Product joined with its category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductView {
    pub product: Product,
    pub category: Category,
}

/// Substring matching mode for name search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    #[default]
    CaseSensitive,
    CaseInsensitive,
}

impl NameMatch {
    pub fn matches(&self, haystack: &str, needle: &str) -> bool {
        match self {
            NameMatch::CaseSensitive => haystack.contains(needle),
            NameMatch::CaseInsensitive => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }
}

/// Listing filter. An empty filter matches every product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub category_id: Option<CategoryId>,
    pub name_contains: Option<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn name_contains(mut self, needle: impl Into<String>) -> Self {
        self.name_contains = Some(needle.into());
        self
    }

    pub fn matches(&self, product: &Product, mode: NameMatch) -> bool {
        if let Some(category_id) = self.category_id {
            if product.category_id != category_id {
                return false;
            }
        }
        match self.name_contains.as_deref() {
            Some(needle) if !needle.is_empty() => mode.matches(&product.name, needle),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::{Slot, release_conflicts};
    use rust_decimal::prelude::FromPrimitive;

    fn input(category_id: CategoryId) -> ProductInput {
        ProductInput {
            name: "Sonic A1".to_string(),
            description: "Open ear".to_string(),
            price: Decimal::new(29999, 2),
            image: "https://img.example/a1.png".to_string(),
            category_id,
            sidebar_side: None,
            is_hero_highlight: false,
            specifications: vec![],
        }
    }

    fn product_with(placement: Placement) -> Product {
        let mut draft = input(CategoryId::new()).validate().unwrap();
        draft.placement = placement;
        Product::create(ProductId::new(), draft, UserId::new(), Utc::now())
    }

    #[test]
    fn validate_accepts_well_formed_input() {
        let category_id = CategoryId::new();
        let mut raw = input(category_id);
        raw.is_hero_highlight = true;
        raw.specifications = vec!["40h battery".into(), " ".into()];

        let draft = raw.validate().unwrap();
        assert_eq!(draft.category_id, category_id);
        assert!(draft.placement.hero);
        assert_eq!(draft.specifications.entries(), ["40h battery"]);
        assert_eq!(draft.price.amount(), Decimal::new(29999, 2));
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut raw = input(CategoryId::new());
        raw.name = "  ".to_string();
        assert!(matches!(raw.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_empty_description() {
        let mut raw = input(CategoryId::new());
        raw.description = String::new();
        assert!(matches!(raw.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_blank_description() {
        let mut raw = input(CategoryId::new());
        raw.description = " \t ".to_string();
        assert!(matches!(raw.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn created_at_is_truncated_to_microseconds() {
        let draft = input(CategoryId::new()).validate().unwrap();
        let at = DateTime::parse_from_rfc3339("2026-10-17T21:06:43.650589356Z")
            .unwrap()
            .with_timezone(&Utc);

        let product = Product::create(ProductId::new(), draft.clone(), UserId::new(), at);
        assert_eq!(product.created_at.timestamp_subsec_nanos(), 650_589_000);

        let revised = product.revise(draft);
        assert_eq!(revised.created_at, product.created_at);
    }

    #[test]
    fn case_insensitive_match_folds_non_ascii() {
        assert!(NameMatch::CaseInsensitive.matches("ÉCRAN Pro", "écran"));
        assert!(!NameMatch::CaseSensitive.matches("ÉCRAN Pro", "écran"));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut raw = input(CategoryId::new());
        raw.price = Decimal::from_f64(-0.01).unwrap();
        assert!(matches!(raw.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn revise_keeps_creation_metadata() {
        let original = product_with(Placement::new(true, None));
        let mut draft = input(CategoryId::new()).validate().unwrap();
        draft.name = "Sonic A2".to_string();

        let revised = original.revise(draft);
        assert_eq!(revised.id, original.id);
        assert_eq!(revised.created_by, original.created_by);
        assert_eq!(revised.created_at, original.created_at);
        assert_eq!(revised.name, "Sonic A2");
        assert!(!revised.is_hero_highlight());
    }

    #[test]
    fn filter_by_category_and_name() {
        let product = product_with(Placement::NONE);
        let sensitive = NameMatch::CaseSensitive;
        assert!(ProductFilter::all().matches(&product, sensitive));
        assert!(ProductFilter::all().name_contains("A1").matches(&product, sensitive));
        assert!(ProductFilter::all().name_contains("").matches(&product, sensitive));

        let lower = ProductFilter::all().name_contains("a1");
        assert!(!lower.matches(&product, sensitive));
        assert!(lower.matches(&product, NameMatch::CaseInsensitive));

        let elsewhere = ProductFilter::all().in_category(CategoryId::new());
        assert!(!elsewhere.matches(&product, sensitive));
        let here = ProductFilter::all().in_category(product.category_id);
        assert!(here.matches(&product, sensitive));
    }

    #[test]
    fn claiming_hero_releases_every_other_holder() {
        let claimant = product_with(Placement::new(true, None));
        // Corrupt starting state on purpose: the clear must not stop at the first hit.
        let mut others = vec![
            product_with(Placement::new(true, None)),
            product_with(Placement::new(true, Some(SidebarSide::Left))),
            claimant.clone(),
        ];

        let released = release_conflicts(others.iter_mut(), &claimant);
        assert_eq!(released.len(), 2);
        assert!(released.iter().all(|r| r.slot == Slot::Hero));
        assert!(!others[0].is_hero_highlight());
        assert!(!others[1].is_hero_highlight());
        assert_eq!(others[1].sidebar_side(), Some(SidebarSide::Left));
        assert!(others[2].is_hero_highlight());
    }

    #[test]
    fn claiming_one_side_leaves_the_other_side_alone() {
        let claimant = product_with(Placement::new(false, Some(SidebarSide::Left)));
        let mut others = vec![
            product_with(Placement::new(false, Some(SidebarSide::Left))),
            product_with(Placement::new(false, Some(SidebarSide::Right))),
        ];

        let released = release_conflicts(others.iter_mut(), &claimant);
        assert_eq!(released.len(), 1);
        assert_eq!(released[0].from, others[0].id);
        assert_eq!(others[0].sidebar_side(), None);
        assert_eq!(others[1].sidebar_side(), Some(SidebarSide::Right));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn arb_placement() -> impl Strategy<Value = Placement> {
            (
                any::<bool>(),
                prop_oneof![
                    Just(None),
                    Just(Some(SidebarSide::Left)),
                    Just(Some(SidebarSide::Right)),
                ],
            )
                .prop_map(|(hero, sidebar)| Placement::new(hero, sidebar))
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                .. ProptestConfig::default()
            })]

            /// Any sequence of writes (new product or re-save of an existing one)
            /// leaves at most one holder per slot.
            #[test]
            fn slots_never_have_two_holders(
                writes in prop::collection::vec((any::<prop::sample::Index>(), any::<bool>(), arb_placement()), 1..40)
            ) {
                let mut catalog: Vec<Product> = Vec::new();

                for (index, is_update, placement) in writes {
                    let incoming = if is_update && !catalog.is_empty() {
                        let mut p = catalog[index.index(catalog.len())].clone();
                        p.placement = placement;
                        p
                    } else {
                        product_with(placement)
                    };

                    release_conflicts(catalog.iter_mut(), &incoming);
                    match catalog.iter_mut().find(|p| p.id == incoming.id) {
                        Some(existing) => *existing = incoming,
                        None => catalog.push(incoming),
                    }

                    for slot in [Slot::Hero, Slot::Sidebar(SidebarSide::Left), Slot::Sidebar(SidebarSide::Right)] {
                        let holders = catalog.iter().filter(|p| p.placement.holds(slot)).count();
                        prop_assert!(holders <= 1, "{} has {} holders", slot, holders);
                    }
                }
            }
        }
    }
}
