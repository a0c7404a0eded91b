//! Collaborator ports consumed by the catalog engine.
//!
//! The engine owns no state of its own: every read and write goes through a
//! `Repository`. Image bytes go through a `BlobStore`, and the transport layer
//! turns bearer tokens into an `Identity` with an `IdentityResolver` before
//! calling the engine.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    AuditEntry, Category, Claim, Item, ItemImage, Notification, User, UserStats,
};
use crate::enums::ClaimStatus;
use crate::errors::{BlobError, RepoError};
use crate::filters::{AuditFilter, ItemFilter, UserFilter};
use crate::identity::Identity;
use crate::updates::ItemPatch;

/// Durable keyed storage for catalog records.
///
/// Single statements are expected to be atomic. Claims must be unique per
/// `(item_id, user_id)`; `insert_claim` reports a violation as
/// `RepoError::Unique`. An insert that reuses an existing primary key fails
/// with `RepoError::IdCollision` instead.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Generate a fresh `{prefix}-{hex}` identifier.
    async fn generate_id(&self, prefix: &str) -> Result<String, RepoError>;

    // --- items ---

    /// All items matching `filter`, newest first.
    async fn find_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepoError>;
    async fn find_item(&self, id: &str) -> Result<Option<Item>, RepoError>;
    async fn insert_item(&self, item: &Item) -> Result<Item, RepoError>;
    /// Apply `patch` and stamp `updated_at`. `None` if the item does not exist.
    async fn update_item_fields(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepoError>;
    /// Delete an item with its images and claims. `false` if nothing was deleted.
    async fn delete_item(&self, id: &str) -> Result<bool, RepoError>;
    async fn insert_item_image(&self, image: &ItemImage) -> Result<(), RepoError>;
    /// Images of an item, primary first.
    async fn find_item_images(&self, item_id: &str) -> Result<Vec<ItemImage>, RepoError>;
    async fn list_categories(&self) -> Result<Vec<Category>, RepoError>;

    // --- claims ---

    async fn find_claim(&self, item_id: &str, user_id: &str)
    -> Result<Option<Claim>, RepoError>;
    async fn find_claim_by_id(&self, id: &str) -> Result<Option<Claim>, RepoError>;
    async fn insert_claim(&self, claim: &Claim) -> Result<Claim, RepoError>;
    async fn update_claim_status(
        &self,
        id: &str,
        status: ClaimStatus,
    ) -> Result<Option<Claim>, RepoError>;

    // --- notifications & audit ---

    async fn insert_notification(&self, notification: &Notification) -> Result<(), RepoError>;
    async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, RepoError>;
    /// Mark one of `user_id`'s notifications read. `false` if none matched.
    async fn mark_notification_read(&self, id: &str, user_id: &str) -> Result<bool, RepoError>;
    async fn insert_audit_entry(&self, entry: &AuditEntry) -> Result<(), RepoError>;
    async fn list_audit_entries(&self, filter: &AuditFilter)
    -> Result<Vec<AuditEntry>, RepoError>;

    // --- users ---

    async fn find_user(&self, id: &str) -> Result<Option<User>, RepoError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
    async fn insert_user(&self, user: &User) -> Result<User, RepoError>;
    /// Users with item counts, newest first.
    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserStats>, RepoError>;
    /// Delete a user and everything they reported. `false` if no such user.
    async fn delete_user(&self, id: &str) -> Result<bool, RepoError>;
}

/// Opaque storage for uploaded images.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` and return a retrievable URL.
    async fn store(&self, bytes: Vec<u8>, filename: &str) -> Result<String, BlobError>;
}

/// Resolves a bearer token to a caller identity.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, RepoError>;
}
