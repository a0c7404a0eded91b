use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::UserRole;

/// A registered account. The catalog engine reads users but only the admin
/// user operations create or delete them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// A user with counts of the items they reported, for the admin user list.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserStats {
    #[serde(flatten)]
    pub user: User,
    pub item_count: u32,
    pub lost_count: u32,
    pub found_count: u32,
    pub returned_count: u32,
}
