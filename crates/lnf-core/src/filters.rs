//! Filter criteria passed to repository queries.

use crate::entities::{AuditEntry, Item, User};
use crate::enums::{AuditAction, ItemStatus, ResourceType, UserRole, ViewerRole};

/// Filter criteria for item listings.
///
/// `search` is a case-insensitive substring match against title or
/// description; `category` and `status` are exact matches. `exclude_status`
/// carries the visibility rule and wins over an explicit `status`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
    pub exclude_status: Option<ItemStatus>,
}

impl ItemFilter {
    /// Build the filter a viewer is allowed to run. Blank search/category
    /// values are treated as absent.
    #[must_use]
    pub fn for_viewer(
        viewer: ViewerRole,
        search: Option<&str>,
        category: Option<&str>,
        status: Option<ItemStatus>,
    ) -> Self {
        Self {
            search: non_blank(search),
            category: non_blank(category),
            status,
            exclude_status: match viewer {
                ViewerRole::Public => Some(ItemStatus::Returned),
                ViewerRole::Admin => None,
            },
        }
    }

    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if self.exclude_status.is_some_and(|s| s == item.status) {
            return false;
        }
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if let Some(ref category) = self.category {
            if &item.category != category {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            return item.title.to_lowercase().contains(&needle)
                || item.description.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Filter criteria for the admin user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Case-insensitive substring match against name or email.
    pub search: Option<String>,
    pub role: Option<UserRole>,
}

impl UserFilter {
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        if self.role.is_some_and(|r| r != user.role) {
            return false;
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            return user.name.to_lowercase().contains(&needle)
                || user.email.to_lowercase().contains(&needle);
        }
        true
    }
}

/// Filter criteria for audit queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditFilter {
    pub user_id: Option<String>,
    pub action: Option<AuditAction>,
    pub resource_type: Option<ResourceType>,
    pub resource_id: Option<String>,
    pub limit: Option<u32>,
}

impl AuditFilter {
    #[must_use]
    pub fn matches(&self, entry: &AuditEntry) -> bool {
        self.user_id.as_ref().is_none_or(|u| u == &entry.user_id)
            && self.action.is_none_or(|a| a == entry.action)
            && self.resource_type.is_none_or(|r| r == entry.resource_type)
            && self
                .resource_id
                .as_ref()
                .is_none_or(|r| r == &entry.resource_id)
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
