use uuid::Uuid;

use lumina_catalog::NameMatch;
use lumina_core::UserId;

use super::error::CatalogError;

/// Identity used for writes that carry no actor (demo/showcase deployments).
pub const SHOWCASE_USER_ID: UserId =
    UserId::from_uuid(Uuid::from_u128(0x0193_0000_0000_7000_8000_4c55_4d49_4e41));

/// How the creator of a new product is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreatorPolicy {
    /// Use the acting identity, or this one when there is none.
    FallbackTo(UserId),
    /// The acting identity is mandatory.
    RequireIdentity,
}

impl CreatorPolicy {
    pub fn resolve(&self, actor: Option<UserId>) -> Result<UserId, CatalogError> {
        match (actor, self) {
            (Some(actor), _) => Ok(actor),
            (None, CreatorPolicy::FallbackTo(default)) => Ok(*default),
            (None, CreatorPolicy::RequireIdentity) => Err(CatalogError::MissingIdentity),
        }
    }
}

impl Default for CreatorPolicy {
    fn default() -> Self {
        CreatorPolicy::FallbackTo(SHOWCASE_USER_ID)
    }
}

/// Service knobs (see `lumina_api::config`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogSettings {
    pub creator_policy: CreatorPolicy,
    pub name_match: NameMatch,
    /// Extra attempts after a write conflict.
    pub write_retries: u32,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            creator_policy: CreatorPolicy::default(),
            name_match: NameMatch::CaseSensitive,
            write_retries: 3,
        }
    }
}
