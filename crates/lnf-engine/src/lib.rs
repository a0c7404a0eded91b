//! # lnf-engine
//!
//! The lost-and-found catalog engine.
//!
//! - **Item Lifecycle Engine** ([`lifecycle`]): item creation with title
//!   derivation and graceful image degradation, guarded status updates,
//!   deletion, claim submission with duplicate prevention, and claim review.
//! - **Listing & Filter Engine** ([`listing`]): viewer-scoped listing with
//!   search/category/status filters, pagination, and owner enrichment.
//!
//! Storage is reached only through the ports in `lnf_core::ports`.
//! [`memory::InMemoryRepository`] is a complete in-process fake;
//! [`blob::ObjectBlobStore`] stores images through `object_store`.

pub mod accounts;
pub mod blob;
pub mod error;
pub mod inputs;
pub mod lifecycle;
pub mod listing;
pub mod memory;
pub mod service;
pub mod title;

#[cfg(test)]
mod test_support;

pub use error::{CatalogError, ErrorKind};
pub use inputs::{ImageUpload, ListQuery, NewItem, NewUser};
pub use service::{CatalogService, ListingSettings};
