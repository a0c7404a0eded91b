//! `CatalogService`: the engine's entry point.
//!
//! The service holds no catalog state. Every operation loads and stores
//! through the `Repository` port; images go through an optional `BlobStore`.
//! Operations are split across modules as `impl CatalogService` blocks:
//! [`crate::lifecycle`] for mutations and claims, [`crate::listing`] for
//! viewer-scoped reads, [`crate::accounts`] for users and notifications.

use std::sync::Arc;

use chrono::Utc;
use lnf_config::GeneralConfig;
use lnf_core::entities::{AuditEntry, Notification};
use lnf_core::enums::{AuditAction, NotificationKind, ResourceType};
use lnf_core::errors::{BlobError, RepoError};
use lnf_core::identity::Identity;
use lnf_core::ids::{PREFIX_AUDIT, PREFIX_NOTIFICATION};
use lnf_core::ports::{BlobStore, Repository};
use tracing::warn;

use crate::error::CatalogError;
use crate::inputs::ImageUpload;

/// Listing knobs taken from `[general]` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSettings {
    pub per_page: u32,
    pub max_per_page: u32,
    pub unknown_owner_email: String,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self::from(&GeneralConfig::default())
    }
}

impl From<&GeneralConfig> for ListingSettings {
    fn from(general: &GeneralConfig) -> Self {
        Self {
            per_page: general.per_page,
            max_per_page: general.max_per_page,
            unknown_owner_email: general.unknown_owner_email.clone(),
        }
    }
}

/// A best-effort notification, addressed to one user.
pub(crate) struct NotificationDraft<'a> {
    pub user_id: &'a str,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub item_id: Option<&'a str>,
}

pub struct CatalogService {
    repo: Arc<dyn Repository>,
    blobs: Option<Arc<dyn BlobStore>>,
    settings: ListingSettings,
}

impl CatalogService {
    #[must_use]
    pub fn new(repo: Arc<dyn Repository>) -> Self {
        Self {
            repo,
            blobs: None,
            settings: ListingSettings::default(),
        }
    }

    #[must_use]
    pub fn with_blob_store(mut self, blobs: Arc<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    #[must_use]
    pub fn with_settings(mut self, settings: ListingSettings) -> Self {
        self.settings = settings;
        self
    }

    #[must_use]
    pub fn repo(&self) -> &dyn Repository {
        self.repo.as_ref()
    }

    #[must_use]
    pub const fn settings(&self) -> &ListingSettings {
        &self.settings
    }

    /// Send an upload to the blob store, if one is configured.
    pub(crate) async fn store_image(&self, upload: ImageUpload) -> Result<String, BlobError> {
        let blobs = self.blobs.as_ref().ok_or(BlobError::NotConfigured)?;
        blobs.store(upload.bytes, &upload.filename).await
    }

    /// Append an audit entry. Failures are logged, never returned.
    pub(crate) async fn record_audit(
        &self,
        actor: &Identity,
        action: AuditAction,
        resource_type: ResourceType,
        resource_id: &str,
        detail: Option<serde_json::Value>,
    ) {
        let result: Result<(), RepoError> = async {
            let entry = AuditEntry {
                id: self.repo.generate_id(PREFIX_AUDIT).await?,
                user_id: actor.user_id.clone(),
                action,
                resource_type,
                resource_id: resource_id.to_string(),
                detail,
                created_at: Utc::now(),
            };
            self.repo.insert_audit_entry(&entry).await
        }
        .await;

        if let Err(e) = result {
            warn!(%action, resource_id, error = %e, "audit entry dropped");
        }
    }

    /// Deliver a notification. Failures are logged, never returned.
    pub(crate) async fn notify(&self, draft: NotificationDraft<'_>) {
        let NotificationDraft {
            user_id,
            kind,
            title,
            message,
            item_id,
        } = draft;
        let result: Result<(), RepoError> = async {
            let notification = Notification {
                id: self.repo.generate_id(PREFIX_NOTIFICATION).await?,
                user_id: user_id.to_string(),
                kind,
                title,
                message,
                item_id: item_id.map(String::from),
                is_read: false,
                created_at: Utc::now(),
            };
            self.repo.insert_notification(&notification).await
        }
        .await;

        if let Err(e) = result {
            warn!(%kind, recipient = user_id, error = %e, "notification dropped");
        }
    }
}

/// Turn an optional identity into an authenticated one.
pub(crate) fn authenticated(identity: Option<&Identity>) -> Result<&Identity, CatalogError> {
    match identity {
        Some(id) if !id.user_id.trim().is_empty() => Ok(id),
        _ => Err(CatalogError::Unauthenticated),
    }
}

/// Serialize an audit detail payload, logging instead of failing.
pub(crate) fn detail_json<T: serde::Serialize>(detail: &T) -> Option<serde_json::Value> {
    match serde_json::to_value(detail) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "audit detail not serializable");
            None
        }
    }
}
