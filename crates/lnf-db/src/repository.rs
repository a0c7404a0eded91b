//! Port implementations: `Repository` and `IdentityResolver` for `LnfDb`.
//!
//! Each method delegates to the inherent method of the same name in
//! [`crate::repos`] and converts `DatabaseError` into `RepoError`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lnf_core::entities::{
    AuditEntry, Category, Claim, Item, ItemImage, Notification, User, UserStats,
};
use lnf_core::enums::ClaimStatus;
use lnf_core::errors::RepoError;
use lnf_core::filters::{AuditFilter, ItemFilter, UserFilter};
use lnf_core::identity::Identity;
use lnf_core::ports::{IdentityResolver, Repository};
use lnf_core::updates::ItemPatch;

use crate::LnfDb;

#[async_trait]
impl Repository for LnfDb {
    async fn generate_id(&self, prefix: &str) -> Result<String, RepoError> {
        Ok(Self::generate_id(self, prefix).await?)
    }

    async fn find_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, RepoError> {
        Ok(Self::find_items(self, filter).await?)
    }

    async fn find_item(&self, id: &str) -> Result<Option<Item>, RepoError> {
        Ok(Self::find_item(self, id).await?)
    }

    async fn insert_item(&self, item: &Item) -> Result<Item, RepoError> {
        Ok(Self::insert_item(self, item).await?)
    }

    async fn update_item_fields(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>, RepoError> {
        Ok(Self::update_item_fields(self, id, patch, updated_at).await?)
    }

    async fn delete_item(&self, id: &str) -> Result<bool, RepoError> {
        Ok(Self::delete_item(self, id).await?)
    }

    async fn insert_item_image(&self, image: &ItemImage) -> Result<(), RepoError> {
        Ok(Self::insert_item_image(self, image).await?)
    }

    async fn find_item_images(&self, item_id: &str) -> Result<Vec<ItemImage>, RepoError> {
        Ok(Self::find_item_images(self, item_id).await?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>, RepoError> {
        Ok(Self::list_categories(self).await?)
    }

    async fn find_claim(&self, item_id: &str, user_id: &str) -> Result<Option<Claim>, RepoError> {
        Ok(Self::find_claim(self, item_id, user_id).await?)
    }

    async fn find_claim_by_id(&self, id: &str) -> Result<Option<Claim>, RepoError> {
        Ok(Self::find_claim_by_id(self, id).await?)
    }

    async fn insert_claim(&self, claim: &Claim) -> Result<Claim, RepoError> {
        Ok(Self::insert_claim(self, claim).await?)
    }

    async fn update_claim_status(
        &self,
        id: &str,
        status: ClaimStatus,
    ) -> Result<Option<Claim>, RepoError> {
        Ok(Self::update_claim_status(self, id, status).await?)
    }

    async fn insert_notification(&self, notification: &Notification) -> Result<(), RepoError> {
        Ok(Self::insert_notification(self, notification).await?)
    }

    async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, RepoError> {
        Ok(Self::list_notifications(self, user_id, unread_only).await?)
    }

    async fn mark_notification_read(&self, id: &str, user_id: &str) -> Result<bool, RepoError> {
        Ok(Self::mark_notification_read(self, id, user_id).await?)
    }

    async fn insert_audit_entry(&self, entry: &AuditEntry) -> Result<(), RepoError> {
        Ok(Self::insert_audit_entry(self, entry).await?)
    }

    async fn list_audit_entries(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, RepoError> {
        Ok(Self::list_audit_entries(self, filter).await?)
    }

    async fn find_user(&self, id: &str) -> Result<Option<User>, RepoError> {
        Ok(Self::find_user(self, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(Self::find_user_by_email(self, email).await?)
    }

    async fn insert_user(&self, user: &User) -> Result<User, RepoError> {
        Ok(Self::insert_user(self, user).await?)
    }

    async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserStats>, RepoError> {
        Ok(Self::list_users(self, filter).await?)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, RepoError> {
        Ok(Self::delete_user(self, id).await?)
    }
}

#[async_trait]
impl IdentityResolver for LnfDb {
    async fn resolve(&self, token: &str) -> Result<Option<Identity>, RepoError> {
        Ok(self.resolve_token(token).await?)
    }
}
