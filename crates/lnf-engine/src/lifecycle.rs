//! Item Lifecycle Engine: the single place where item state changes and
//! where claim submission and review are orchestrated.
//!
//! Primary effects (the item or claim row) propagate storage failures.
//! Notifications and audit entries are best-effort: they are logged on
//! failure and never roll back the primary effect.

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use lnf_core::audit_detail::{ClaimItemDetail, ItemDetail, StatusChangedDetail};
use lnf_core::entities::{Claim, Item, ItemImage};
use lnf_core::enums::{AuditAction, ClaimStatus, ItemStatus, NotificationKind, ResourceType};
use lnf_core::errors::RepoError;
use lnf_core::identity::Identity;
use lnf_core::ids::{PREFIX_CLAIM, PREFIX_IMAGE, PREFIX_ITEM};
use lnf_core::responses::ClaimOutcome;
use lnf_core::updates::{ItemPatch, ItemPatchBuilder};

use crate::error::CatalogError;
use crate::inputs::{ImageUpload, NewItem};
use crate::service::{CatalogService, NotificationDraft, authenticated, detail_json};
use crate::title::derive_title;

/// Message stored on a claim submitted without one.
pub const DEFAULT_CLAIM_MESSAGE: &str = "I believe this item belongs to me.";

/// `image_type` of images recorded by the engine.
pub const DEFAULT_IMAGE_TYPE: &str = "photo";

const DEFAULT_CATEGORY: &str = "other";
const CLAIM_ID_ATTEMPTS: usize = 3;

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl CatalogService {
    /// Create an item owned by `submitter`.
    ///
    /// An attached image is uploaded first; if the upload fails the item is
    /// still created, without an image.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` without an identity; `Storage` if the item insert fails.
    pub async fn create_item(
        &self,
        submitter: Option<&Identity>,
        new: NewItem,
    ) -> Result<Item, CatalogError> {
        let submitter = authenticated(submitter)?;

        let status = ItemStatus::from_submitted(new.status.as_deref());
        let description = new.description.unwrap_or_default().trim().to_string();
        let title = derive_title(new.title.as_deref(), &description, status);
        if title.is_empty() {
            return Err(CatalogError::validation("Title cannot be empty"));
        }

        let uploaded = match new.image {
            Some(upload) => {
                let filename = upload.filename.clone();
                match self.store_image(upload).await {
                    Ok(url) => Some(url),
                    Err(e) => {
                        warn!(%filename, error = %e, "image upload failed, creating item without it");
                        None
                    }
                }
            }
            None => None,
        };

        let now = Utc::now();
        let item = Item {
            id: self.repo().generate_id(PREFIX_ITEM).await?,
            title,
            description,
            category: trimmed(new.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            status,
            location: trimmed(new.location).unwrap_or_default(),
            date_found: new.date_found.unwrap_or_else(|| now.date_naive()),
            image_url: uploaded.clone().or_else(|| trimmed(new.image_url)),
            user_id: submitter.user_id.clone(),
            custody_status: new.custody_status,
            admin_notes: None,
            contact_info: trimmed(new.contact_info),
            created_at: now,
            updated_at: now,
        };
        let item = self.repo().insert_item(&item).await?;

        if let Some(url) = uploaded {
            self.record_primary_image(&item.id, url).await;
        }

        self.record_audit(
            submitter,
            AuditAction::CreateItem,
            ResourceType::Item,
            &item.id,
            detail_json(&ItemDetail {
                title: item.title.clone(),
                status: item.status.to_string(),
            }),
        )
        .await;

        info!(item_id = %item.id, status = %item.status, "item created");
        Ok(item)
    }

    async fn record_primary_image(&self, item_id: &str, image_url: String) {
        let result: Result<(), RepoError> = async {
            let image = ItemImage {
                id: self.repo().generate_id(PREFIX_IMAGE).await?,
                item_id: item_id.to_string(),
                image_url,
                image_type: DEFAULT_IMAGE_TYPE.to_string(),
                is_primary: true,
                created_at: Utc::now(),
            };
            self.repo().insert_item_image(&image).await
        }
        .await;
        if let Err(e) = result {
            warn!(item_id, error = %e, "primary image record dropped");
        }
    }

    /// Apply a sparse patch to an item and refresh `updated_at`.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty patch, a blank title, or a disallowed status
    /// transition; `NotFound` if the item does not exist.
    pub async fn update_item(
        &self,
        actor: &Identity,
        item_id: &str,
        mut patch: ItemPatch,
    ) -> Result<Item, CatalogError> {
        if patch.is_empty() {
            return Err(CatalogError::validation("No valid fields to update"));
        }
        if let Some(title) = patch.title.take() {
            let title = title.trim();
            if title.is_empty() {
                return Err(CatalogError::validation("Title cannot be empty"));
            }
            patch.title = Some(title.to_string());
        }

        let current = self
            .repo()
            .find_item(item_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Item not found"))?;

        if let Some(next) = patch.status {
            if !current.status.can_transition_to(next) {
                return Err(CatalogError::Validation(format!(
                    "Cannot change status from {} to {next}",
                    current.status
                )));
            }
        }

        let updated = self
            .repo()
            .update_item_fields(item_id, &patch, Utc::now())
            .await?
            .ok_or_else(|| CatalogError::not_found("Item not found"))?;

        let mut detail = json!({ "changes": patch });
        if current.status != updated.status {
            let change = StatusChangedDetail {
                from: current.status.to_string(),
                to: updated.status.to_string(),
                reason: None,
            };
            detail["status_change"] = json!(change);
        }
        self.record_audit(
            actor,
            AuditAction::UpdateItem,
            ResourceType::Item,
            item_id,
            Some(detail),
        )
        .await;

        info!(item_id, status = %updated.status, "item updated");
        Ok(updated)
    }

    /// Delete an item together with its images and claims.
    ///
    /// # Errors
    ///
    /// `NotFound` if nothing was deleted.
    pub async fn delete_item(&self, actor: &Identity, item_id: &str) -> Result<(), CatalogError> {
        let existing = self.repo().find_item(item_id).await?;
        if !self.repo().delete_item(item_id).await? {
            return Err(CatalogError::not_found("Item not found"));
        }

        let detail = existing.and_then(|item| {
            detail_json(&ItemDetail {
                title: item.title,
                status: item.status.to_string(),
            })
        });
        self.record_audit(
            actor,
            AuditAction::DeleteItem,
            ResourceType::Item,
            item_id,
            detail,
        )
        .await;

        info!(item_id, "item deleted");
        Ok(())
    }

    /// Upload an extra image for an item. Unlike on create, an upload
    /// failure here is the operation's failure.
    ///
    /// # Errors
    ///
    /// `NotFound` if the item does not exist; `Storage` if the upload or the
    /// insert fails.
    pub async fn attach_image(
        &self,
        actor: &Identity,
        item_id: &str,
        upload: ImageUpload,
        primary: bool,
    ) -> Result<ItemImage, CatalogError> {
        if self.repo().find_item(item_id).await?.is_none() {
            return Err(CatalogError::not_found("Item not found"));
        }

        let image_url = self.store_image(upload).await?;
        let image = ItemImage {
            id: self.repo().generate_id(PREFIX_IMAGE).await?,
            item_id: item_id.to_string(),
            image_url,
            image_type: DEFAULT_IMAGE_TYPE.to_string(),
            is_primary: primary,
            created_at: Utc::now(),
        };
        self.repo().insert_item_image(&image).await?;

        info!(item_id, image_id = %image.id, actor = %actor.user_id, "image attached");
        Ok(image)
    }

    /// Claim an item on behalf of `claimant`.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` without an identity; `NotAvailable` if the item is
    /// missing or not lost/found; `DuplicateClaim` if the claimant already
    /// holds a claim on it, including when a concurrent submission wins the
    /// race to the unique constraint.
    pub async fn submit_claim(
        &self,
        claimant: Option<&Identity>,
        item_id: &str,
        message: Option<String>,
    ) -> Result<ClaimOutcome, CatalogError> {
        let claimant = authenticated(claimant)?;

        let item = match self.repo().find_item(item_id).await? {
            Some(item) if item.status.is_claimable() => item,
            _ => {
                return Err(CatalogError::NotAvailable(
                    "Item not found or not available for claiming".into(),
                ));
            }
        };

        if self
            .repo()
            .find_claim(item_id, &claimant.user_id)
            .await?
            .is_some()
        {
            return Err(duplicate_claim());
        }

        let message = trimmed(message).unwrap_or_else(|| DEFAULT_CLAIM_MESSAGE.to_string());
        let mut attempt = 0;
        let claim = loop {
            attempt += 1;
            let claim = Claim {
                id: self.repo().generate_id(PREFIX_CLAIM).await?,
                item_id: item.id.clone(),
                user_id: claimant.user_id.clone(),
                message: Some(message.clone()),
                status: ClaimStatus::Pending,
                created_at: Utc::now(),
            };
            match self.repo().insert_claim(&claim).await {
                Ok(claim) => break claim,
                Err(RepoError::Unique(_)) => return Err(duplicate_claim()),
                Err(RepoError::IdCollision(key)) if attempt < CLAIM_ID_ATTEMPTS => {
                    debug!(%key, attempt, "claim id taken, generating another");
                }
                Err(e) => return Err(e.into()),
            }
        };

        if item.user_id != claimant.user_id {
            let claimant_name = self.display_name(&claimant.user_id).await;
            self.notify(NotificationDraft {
                user_id: &item.user_id,
                kind: NotificationKind::ClaimRequest,
                title: format!("Claim request for your {} item", item.status),
                message: format!("{claimant_name} has requested to claim '{}'", item.title),
                item_id: Some(&item.id),
            })
            .await;
        }

        self.record_audit(
            claimant,
            AuditAction::ClaimItem,
            ResourceType::Item,
            &item.id,
            detail_json(&ClaimItemDetail {
                item_title: item.title.clone(),
                claim_message: message,
                item_owner_id: item.user_id.clone(),
            }),
        )
        .await;

        info!(claim_id = %claim.id, item_id = %item.id, "claim submitted");
        Ok(ClaimOutcome { claim, item })
    }

    /// Move a claim to `decision` and carry the item along with it:
    /// approval marks the item claimed, verification marks it returned.
    ///
    /// # Errors
    ///
    /// `NotFound` if the claim or its item is gone; `Validation` if the claim
    /// cannot move to `decision` from its current status.
    pub async fn review_claim(
        &self,
        actor: &Identity,
        claim_id: &str,
        decision: ClaimStatus,
    ) -> Result<ClaimOutcome, CatalogError> {
        let claim = self
            .repo()
            .find_claim_by_id(claim_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Claim not found"))?;

        if !claim.status.can_transition_to(decision) {
            return Err(CatalogError::Validation(format!(
                "Cannot move claim from {} to {decision}",
                claim.status
            )));
        }

        let mut item = self
            .repo()
            .find_item(&claim.item_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Item not found"))?;

        let updated_claim = self
            .repo()
            .update_claim_status(claim_id, decision)
            .await?
            .ok_or_else(|| CatalogError::not_found("Claim not found"))?;

        let item_target = match decision {
            ClaimStatus::Approved => Some(ItemStatus::Claimed),
            ClaimStatus::Verified => Some(ItemStatus::Returned),
            ClaimStatus::Pending | ClaimStatus::Denied => None,
        };
        if let Some(target) = item_target {
            if item.status != target && item.status.can_transition_to(target) {
                let patch = ItemPatchBuilder::new().status(target).build();
                if let Some(moved) = self
                    .repo()
                    .update_item_fields(&item.id, &patch, Utc::now())
                    .await?
                {
                    item = moved;
                }
            }
        }

        let verdict = match decision {
            ClaimStatus::Approved => Some((NotificationKind::ClaimApproved, "approved")),
            ClaimStatus::Denied => Some((NotificationKind::ClaimDenied, "denied")),
            ClaimStatus::Pending | ClaimStatus::Verified => None,
        };
        if let Some((kind, word)) = verdict {
            self.notify(NotificationDraft {
                user_id: &updated_claim.user_id,
                kind,
                title: format!("Your claim was {word}"),
                message: format!("Your claim for '{}' has been {word}", item.title),
                item_id: Some(&item.id),
            })
            .await;
        }

        self.record_audit(
            actor,
            AuditAction::ReviewClaim,
            ResourceType::Claim,
            claim_id,
            detail_json(&StatusChangedDetail {
                from: claim.status.to_string(),
                to: decision.to_string(),
                reason: None,
            }),
        )
        .await;

        info!(claim_id, decision = %decision, item_status = %item.status, "claim reviewed");
        Ok(ClaimOutcome {
            claim: updated_claim,
            item,
        })
    }
}

fn duplicate_claim() -> CatalogError {
    CatalogError::DuplicateClaim("You have already claimed this item".into())
}
