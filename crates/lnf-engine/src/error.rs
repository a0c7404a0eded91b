//! Error taxonomy surfaced by the catalog engine.
//!
//! Every variant carries a human-readable message. Callers branch on
//! [`CatalogError::kind`] rather than on message text.

use lnf_core::errors::{BlobError, RepoError};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// No resolvable caller identity.
    #[error("Authentication required")]
    Unauthenticated,

    /// Malformed or insufficient input.
    #[error("{0}")]
    Validation(String),

    /// Referenced entity absent, or invisible to this viewer.
    #[error("{0}")]
    NotFound(String),

    /// Item missing or not in a claimable state.
    #[error("{0}")]
    NotAvailable(String),

    /// The caller already holds a claim on this item.
    #[error("{0}")]
    DuplicateClaim(String),

    /// Repository or blob store I/O failure on a primary effect.
    #[error("Storage failure: {0}")]
    Storage(String),
}

/// Fieldless discriminant of [`CatalogError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Unauthenticated,
    Validation,
    NotFound,
    NotAvailable,
    DuplicateClaim,
    Storage,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::NotAvailable => "not_available",
            Self::DuplicateClaim => "duplicate_claim",
            Self::Storage => "storage",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CatalogError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::NotAvailable(_) => ErrorKind::NotAvailable,
            Self::DuplicateClaim(_) => ErrorKind::DuplicateClaim,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<RepoError> for CatalogError {
    fn from(err: RepoError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<BlobError> for CatalogError {
    fn from(err: BlobError) -> Self {
        Self::Storage(err.to_string())
    }
}
