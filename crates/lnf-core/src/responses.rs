//! Response shapes returned by the catalog engine.
//!
//! Items handed to callers are enriched with the owner's display data.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Claim, Item, ItemImage};

/// Display name used when an item's owner cannot be resolved.
pub const UNKNOWN_OWNER_NAME: &str = "Unknown";

/// An item joined with its owner's display name and email.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemView {
    #[serde(flatten)]
    pub item: Item,
    pub user_name: String,
    pub user_email: String,
}

/// A single item with its secondary images (primary first).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemDetail {
    #[serde(flatten)]
    pub view: ItemView,
    pub additional_images: Vec<ItemImage>,
}

/// One page of an item listing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemPage {
    pub items: Vec<ItemView>,
    /// Size of the filtered set before pagination.
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
}

/// Result of a successful claim submission or review.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub claim: Claim,
    pub item: Item,
}
