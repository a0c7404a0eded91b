//! Users, notifications, and audit log queries.

use chrono::Utc;
use tracing::info;

use lnf_core::audit_detail::UserDeletedDetail;
use lnf_core::entities::{AuditEntry, Notification, User, UserStats};
use lnf_core::enums::{AuditAction, ResourceType};
use lnf_core::errors::RepoError;
use lnf_core::filters::{AuditFilter, UserFilter};
use lnf_core::identity::Identity;
use lnf_core::ids::PREFIX_USER;

use crate::error::CatalogError;
use crate::inputs::NewUser;
use crate::service::{CatalogService, detail_json};

fn valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

impl CatalogService {
    /// Register an account. Emails are stored trimmed and lowercased.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank name, a malformed email, or an email that is
    /// already registered.
    pub async fn register_user(&self, new: NewUser) -> Result<User, CatalogError> {
        let name = new.name.trim();
        if name.is_empty() {
            return Err(CatalogError::validation("Name is required"));
        }
        let email = new.email.trim().to_lowercase();
        if !valid_email(&email) {
            return Err(CatalogError::Validation(format!("Invalid email: {email}")));
        }
        if self.repo().find_user_by_email(&email).await?.is_some() {
            return Err(CatalogError::validation("Email already registered"));
        }

        let user = User {
            id: self.repo().generate_id(PREFIX_USER).await?,
            name: name.to_string(),
            email,
            role: new.role,
            created_at: Utc::now(),
        };
        let user = match self.repo().insert_user(&user).await {
            Ok(user) => user,
            Err(RepoError::Unique(_)) => {
                return Err(CatalogError::validation("Email already registered"));
            }
            Err(e) => return Err(e.into()),
        };

        info!(user_id = %user.id, role = %user.role, "user registered");
        Ok(user)
    }

    /// Users with their item counts, newest first.
    ///
    /// # Errors
    ///
    /// `Storage` if the repository query fails.
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserStats>, CatalogError> {
        Ok(self.repo().list_users(filter).await?)
    }

    /// Delete a user along with everything they reported.
    ///
    /// # Errors
    ///
    /// `NotFound` if the user does not exist.
    pub async fn delete_user(&self, actor: &Identity, user_id: &str) -> Result<(), CatalogError> {
        let user = self
            .repo()
            .find_user(user_id)
            .await?
            .ok_or_else(|| CatalogError::not_found("User not found"))?;
        if !self.repo().delete_user(user_id).await? {
            return Err(CatalogError::not_found("User not found"));
        }

        self.record_audit(
            actor,
            AuditAction::DeleteUser,
            ResourceType::User,
            user_id,
            detail_json(&UserDeletedDetail {
                name: user.name,
                email: user.email,
            }),
        )
        .await;

        info!(user_id, "user deleted");
        Ok(())
    }

    /// The viewer's notifications, newest first.
    ///
    /// # Errors
    ///
    /// `Storage` if the repository query fails.
    pub async fn list_notifications(
        &self,
        viewer: &Identity,
        unread_only: bool,
    ) -> Result<Vec<Notification>, CatalogError> {
        Ok(self
            .repo()
            .list_notifications(&viewer.user_id, unread_only)
            .await?)
    }

    /// # Errors
    ///
    /// `NotFound` unless the notification exists and belongs to `viewer`.
    pub async fn mark_notification_read(
        &self,
        viewer: &Identity,
        notification_id: &str,
    ) -> Result<(), CatalogError> {
        if self
            .repo()
            .mark_notification_read(notification_id, &viewer.user_id)
            .await?
        {
            Ok(())
        } else {
            Err(CatalogError::not_found("Notification not found"))
        }
    }

    /// # Errors
    ///
    /// `Storage` if the repository query fails.
    pub async fn list_audit(&self, filter: &AuditFilter) -> Result<Vec<AuditEntry>, CatalogError> {
        Ok(self.repo().list_audit_entries(filter).await?)
    }
}
