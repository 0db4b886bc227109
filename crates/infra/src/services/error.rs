use thiserror::Error;

use lumina_core::DomainError;

use crate::store::StoreError;

/// Errors reported to callers of the catalog services.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed input; nothing was written.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced category does not exist; nothing was written.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    #[error("not found")]
    NotFound,

    /// No acting identity and no fallback configured.
    #[error("an acting identity is required")]
    MissingIdentity,

    /// A unique value is already taken.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store could not complete the write; it was rolled back.
    #[error("write failed: {0}")]
    WriteFailed(String),

    #[error("read failed: {0}")]
    ReadFailed(String),
}

impl CatalogError {
    /// Map a store error raised on the write path.
    pub fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::InvalidReference(msg) => Self::InvalidReference(msg),
            StoreError::Duplicate(msg) => Self::Conflict(msg),
            StoreError::Conflict(msg) | StoreError::Backend(msg) => Self::WriteFailed(msg),
        }
    }

    /// Map a store error raised on the read path.
    pub fn from_read(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            other => Self::ReadFailed(other.to_string()),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) | DomainError::InvalidId(msg) => Self::Validation(msg),
            DomainError::InvalidReference(msg) => Self::InvalidReference(msg),
            DomainError::InvariantViolation(msg) => Self::WriteFailed(msg),
            DomainError::NotFound => Self::NotFound,
            DomainError::Conflict(msg) => Self::Conflict(msg),
            DomainError::Unauthorized => Self::MissingIdentity,
        }
    }
}
