use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A secondary image attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ItemImage {
    pub id: String,
    pub item_id: String,
    pub image_url: String,
    pub image_type: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}
