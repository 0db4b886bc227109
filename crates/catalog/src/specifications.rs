//! Product specifications and their persisted encoding.
//!
//! Specifications are an ordered list of free-text lines. They persist as an
//! opaque text blob; [`Specifications::encode`] and [`Specifications::decode`]
//! are the only pair allowed to produce/consume it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use lumina_core::ValueObject;

/// The stored blob could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to decode specifications: {0}")]
pub struct DecodeError(String);

/// Ordered specification lines (never contains blank entries).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specifications(Vec<String>);

impl ValueObject for Specifications {}

impl Specifications {
    /// Build from raw entries, dropping empty and whitespace-only lines.
    /// Remaining entries keep their order and text.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(Into::into)
                .filter(|s| !s.trim().is_empty())
                .collect(),
        )
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn into_entries(self) -> Vec<String> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encode for storage. An empty list is stored as "absent".
    pub fn encode(&self) -> Option<String> {
        if self.0.is_empty() {
            return None;
        }
        // A Vec<String> always serializes.
        serde_json::to_string(&self.0).ok()
    }

    /// Strict decode of a stored blob.
    pub fn decode(blob: Option<&str>) -> Result<Self, DecodeError> {
        match blob {
            None => Ok(Self::default()),
            Some(raw) if raw.trim().is_empty() => Ok(Self::default()),
            Some(raw) => {
                let entries: Vec<String> =
                    serde_json::from_str(raw).map_err(|e| DecodeError(e.to_string()))?;
                Ok(Self::from_entries(entries))
            }
        }
    }

    /// Read-path decode: a corrupt blob degrades to "no specifications".
    pub fn decode_or_empty(blob: Option<&str>) -> Self {
        match Self::decode(blob) {
            Ok(specs) => specs,
            Err(e) => {
                tracing::warn!(error = %e, "discarding undecodable specifications");
                Self::default()
            }
        }
    }
}

impl From<Vec<String>> for Specifications {
    fn from(value: Vec<String>) -> Self {
        Self::from_entries(value)
    }
}
