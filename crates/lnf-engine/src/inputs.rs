//! Caller-supplied inputs for engine operations.

use chrono::NaiveDate;
use lnf_core::enums::{CustodyStatus, ItemStatus, UserRole};

/// Raw image bytes submitted with an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// Fields of a new item submission. Everything but the description may be
/// omitted; the engine fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    /// Submitted status as raw text; unknown values resolve to `found`.
    pub status: Option<String>,
    pub location: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub image_url: Option<String>,
    pub custody_status: Option<CustodyStatus>,
    pub contact_info: Option<String>,
    pub image: Option<ImageUpload>,
}

/// Listing request: filters plus 1-indexed pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<ItemStatus>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: UserRole,
}
