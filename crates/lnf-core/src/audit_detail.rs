//! Typed audit detail payloads.
//!
//! Each audit action can carry a structured `detail` JSON blob. These types
//! fix the shape of the most common ones.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for `AuditAction::ClaimItem`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClaimItemDetail {
    pub item_title: String,
    pub claim_message: String,
    pub item_owner_id: String,
}

/// Detail for `AuditAction::CreateItem` and `AuditAction::DeleteItem`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemDetail {
    pub title: String,
    pub status: String,
}

/// Detail for status transitions (`UpdateItem`, `ReviewClaim`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: String,
    pub to: String,
    pub reason: Option<String>,
}

/// Detail for `AuditAction::DeleteUser`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserDeletedDetail {
    pub name: String,
    pub email: String,
}
