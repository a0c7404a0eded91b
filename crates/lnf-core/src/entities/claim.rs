use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ClaimStatus;

/// A user's assertion of ownership over an item.
///
/// At most one claim exists per `(item_id, user_id)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Claim {
    pub id: String,
    pub item_id: String,
    pub user_id: String,
    pub message: Option<String>,
    pub status: ClaimStatus,
    pub created_at: DateTime<Utc>,
}
