use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{CustodyStatus, ItemStatus};

/// A reported lost or found object.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Item {
    pub id: String,
    /// Never empty once persisted.
    pub title: String,
    pub description: String,
    pub category: String,
    pub status: ItemStatus,
    pub location: String,
    pub date_found: NaiveDate,
    pub image_url: Option<String>,
    pub user_id: String,
    pub custody_status: Option<CustodyStatus>,
    pub admin_notes: Option<String>,
    pub contact_info: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
