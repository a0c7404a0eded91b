//! Error types raised by collaborator ports.
//!
//! Storage backends convert their native errors into `RepoError`; blob store
//! backends into `BlobError`. The catalog engine maps both onto its own
//! taxonomy in `lnf-engine`.

use thiserror::Error;

/// Errors surfaced by a `Repository` implementation.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A uniqueness constraint rejected the write.
    #[error("Unique constraint violated: {0}")]
    Unique(String),

    /// A generated primary key was already taken. Retrying with a fresh id
    /// is safe.
    #[error("Identifier already in use: {0}")]
    IdCollision(String),

    /// A query failed or returned malformed data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Errors surfaced by a `BlobStore` implementation.
#[derive(Debug, Error)]
pub enum BlobError {
    /// No blob backend is configured.
    #[error("Blob store is not configured")]
    NotConfigured,

    /// The upload itself failed (network, credentials, bucket).
    #[error("Upload failed: {0}")]
    Upload(String),
}
