//! Status enums, roles, and audit tags for the catalog.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the engine layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a catalogued item.
///
/// ```text
/// lost  → claimed → returned
/// found → claimed → returned
/// lost | found → returned   (admin direct edit)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Lost,
    Found,
    Claimed,
    Returned,
}

impl ItemStatus {
    pub const ALL: [Self; 4] = [Self::Lost, Self::Found, Self::Claimed, Self::Returned];

    #[must_use]
    #[allow(clippy::match_same_arms)]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Lost => &[Self::Claimed, Self::Returned],
            Self::Found => &[Self::Claimed, Self::Returned],
            Self::Claimed => &[Self::Returned],
            Self::Returned => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    ///
    /// Re-asserting the current status is accepted.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self == next || self.allowed_next_states().contains(&next)
    }

    /// Items can only be claimed while they are still lost or found.
    #[must_use]
    pub const fn is_claimable(self) -> bool {
        matches!(self, Self::Lost | Self::Found)
    }

    /// Returned items are hidden from the public listing.
    #[must_use]
    pub const fn is_public(self) -> bool {
        !matches!(self, Self::Returned)
    }

    /// Resolve a raw submitted status, defaulting blank or unknown values to `found`.
    #[must_use]
    pub fn from_submitted(raw: Option<&str>) -> Self {
        raw.map(|s| s.trim().to_ascii_lowercase())
            .and_then(|s| Self::ALL.into_iter().find(|status| status.as_str() == s))
            .unwrap_or(Self::Found)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lost => "lost",
            Self::Found => "found",
            Self::Claimed => "claimed",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CustodyStatus
// ---------------------------------------------------------------------------

/// Where a found item physically is right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustodyStatus {
    KeptByFinder,
    HandedToOneStop,
    LeftWhereFound,
}

impl CustodyStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::KeptByFinder => "kept_by_finder",
            Self::HandedToOneStop => "handed_to_one_stop",
            Self::LeftWhereFound => "left_where_found",
        }
    }
}

impl fmt::Display for CustodyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ClaimStatus
// ---------------------------------------------------------------------------

/// Status of an ownership claim.
///
/// ```text
/// pending → approved → verified
///         → denied
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Pending,
    Approved,
    Denied,
    Verified,
}

impl ClaimStatus {
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Denied],
            Self::Approved => &[Self::Verified],
            Self::Denied | Self::Verified => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::Verified => "verified",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// UserRole / ViewerRole
// ---------------------------------------------------------------------------

/// Account role stored on the user record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// The listing view this role is entitled to.
    #[must_use]
    pub const fn viewer(self) -> ViewerRole {
        match self {
            Self::User => ViewerRole::Public,
            Self::Admin => ViewerRole::Admin,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which view of the catalog a caller gets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViewerRole {
    #[default]
    Public,
    Admin,
}

impl ViewerRole {
    #[must_use]
    pub const fn can_see(self, status: ItemStatus) -> bool {
        match self {
            Self::Admin => true,
            Self::Public => status.is_public(),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for ViewerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// NotificationKind
// ---------------------------------------------------------------------------

/// Type tag of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ClaimRequest,
    ClaimApproved,
    ClaimDenied,
}

impl NotificationKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClaimRequest => "claim_request",
            Self::ClaimApproved => "claim_approved",
            Self::ClaimDenied => "claim_denied",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    CreateItem,
    UpdateItem,
    DeleteItem,
    ClaimItem,
    ReviewClaim,
    DeleteUser,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CreateItem => "create_item",
            Self::UpdateItem => "update_item",
            Self::DeleteItem => "delete_item",
            Self::ClaimItem => "claim_item",
            Self::ReviewClaim => "review_claim",
            Self::DeleteUser => "delete_user",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ResourceType
// ---------------------------------------------------------------------------

/// Kind of record an audit entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Item,
    Claim,
    User,
}

impl ResourceType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Claim => "claim",
            Self::User => "user",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
