//! Item patch builder.
//!
//! Only `Some` fields are applied. Clearable fields use `Option<Option<T>>`:
//! `None` leaves the column untouched, `Some(None)` clears it. The patch is
//! serialized (changed fields only) as the audit detail for updates.

use serde::Serialize;

use crate::entities::Item;
use crate::enums::{CustodyStatus, ItemStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custody_status: Option<Option<CustodyStatus>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_info: Option<Option<String>>,
}

impl ItemPatch {
    /// True when the patch carries no recognized field at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.admin_notes.is_none()
            && self.location.is_none()
            && self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.custody_status.is_none()
            && self.contact_info.is_none()
    }

    /// Apply the patch to an in-memory item. Does not touch `updated_at`.
    pub fn apply_to(&self, item: &mut Item) {
        if let Some(status) = self.status {
            item.status = status;
        }
        if let Some(ref notes) = self.admin_notes {
            item.admin_notes.clone_from(notes);
        }
        if let Some(ref location) = self.location {
            item.location.clone_from(location);
        }
        if let Some(ref title) = self.title {
            item.title.clone_from(title);
        }
        if let Some(ref description) = self.description {
            item.description.clone_from(description);
        }
        if let Some(ref category) = self.category {
            item.category.clone_from(category);
        }
        if let Some(custody) = self.custody_status {
            item.custody_status = custody;
        }
        if let Some(ref contact) = self.contact_info {
            item.contact_info.clone_from(contact);
        }
    }
}

#[derive(Debug, Default)]
pub struct ItemPatchBuilder(ItemPatch);

impl ItemPatchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ItemPatch::default())
    }

    #[must_use]
    pub fn status(mut self, status: ItemStatus) -> Self {
        self.0.status = Some(status);
        self
    }

    #[must_use]
    pub fn admin_notes(mut self, notes: Option<String>) -> Self {
        self.0.admin_notes = Some(notes);
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.0.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.0.category = Some(category.into());
        self
    }

    #[must_use]
    pub fn custody_status(mut self, custody: Option<CustodyStatus>) -> Self {
        self.0.custody_status = Some(custody);
        self
    }

    #[must_use]
    pub fn contact_info(mut self, contact: Option<String>) -> Self {
        self.0.contact_info = Some(contact);
        self
    }

    #[must_use]
    pub fn build(self) -> ItemPatch {
        self.0
    }
}
