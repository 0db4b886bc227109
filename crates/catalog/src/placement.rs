//! Placement slots and the single-occupant rule.
//!
//! There are three exclusive display slots: the hero spotlight and one
//! sidebar per side. A product claims a slot through its [`Placement`]; when
//! it does, every *other* product holding the same slot loses it. The left
//! and right sidebars are independent of each other.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use lumina_core::{DomainError, Entity, ProductId, ValueObject};

use crate::product::Product;

/// Sidebar side a product may be advertised on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SidebarSide {
    Left,
    Right,
}

impl SidebarSide {
    /// Persisted/wire representation (`"LEFT"` / `"RIGHT"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SidebarSide::Left => "LEFT",
            SidebarSide::Right => "RIGHT",
        }
    }

    /// Parse an optional wire value; an absent or empty value means "no side".
    pub fn parse_optional(raw: Option<&str>) -> Result<Option<Self>, DomainError> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }
}

impl core::fmt::Display for SidebarSide {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SidebarSide {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LEFT" => Ok(SidebarSide::Left),
            "RIGHT" => Ok(SidebarSide::Right),
            other => Err(DomainError::validation(format!(
                "sidebarSide must be LEFT or RIGHT (got {other:?})"
            ))),
        }
    }
}

/// One exclusive display position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Hero,
    Sidebar(SidebarSide),
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Slot::Hero => f.write_str("hero"),
            Slot::Sidebar(SidebarSide::Left) => f.write_str("sidebar-left"),
            Slot::Sidebar(SidebarSide::Right) => f.write_str("sidebar-right"),
        }
    }
}

/// Where a product is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Placement {
    pub hero: bool,
    pub sidebar: Option<SidebarSide>,
}

impl ValueObject for Placement {}

impl Placement {
    pub const NONE: Placement = Placement {
        hero: false,
        sidebar: None,
    };

    pub fn new(hero: bool, sidebar: Option<SidebarSide>) -> Self {
        Self { hero, sidebar }
    }

    /// Slots this placement occupies.
    pub fn claims(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(2);
        if self.hero {
            slots.push(Slot::Hero);
        }
        if let Some(side) = self.sidebar {
            slots.push(Slot::Sidebar(side));
        }
        slots
    }

    pub fn holds(&self, slot: Slot) -> bool {
        match slot {
            Slot::Hero => self.hero,
            Slot::Sidebar(side) => self.sidebar == Some(side),
        }
    }

    /// Vacate `slot` if held. Returns whether anything changed.
    pub fn release(&mut self, slot: Slot) -> bool {
        if !self.holds(slot) {
            return false;
        }
        match slot {
            Slot::Hero => self.hero = false,
            Slot::Sidebar(_) => self.sidebar = None,
        }
        true
    }

    pub fn is_placed(&self) -> bool {
        self.hero || self.sidebar.is_some()
    }
}

/// Record of a slot taken away from a previous holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRelease {
    pub slot: Slot,
    pub from: ProductId,
}

/// Strip every slot `claimant` claims from all other products.
///
/// The claimant itself is skipped (matched by identity), so a product re-saving a
/// slot it already holds keeps it. Clearing is unconditional: every other
/// holder is released, not just the first one found.
pub fn release_conflicts<'a, I>(others: I, claimant: &Product) -> Vec<SlotRelease>
where
    I: IntoIterator<Item = &'a mut Product>,
{
    let claims = claimant.placement.claims();
    if claims.is_empty() {
        return Vec::new();
    }

    let mut released = Vec::new();
    for other in others {
        if other.is_same(claimant) {
            continue;
        }
        for slot in &claims {
            if other.placement.release(*slot) {
                released.push(SlotRelease {
                    slot: *slot,
                    from: other.id,
                });
            }
        }
    }
    released
}
