//! Item repository: filtered listing, CRUD, dynamic field updates.

use chrono::{DateTime, Utc};

use lnf_core::entities::Item;
use lnf_core::filters::ItemFilter;
use lnf_core::updates::ItemPatch;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::{
    fmt_date, fmt_datetime, get_opt_string, opt_text, parse_date, parse_datetime, parse_enum,
    parse_optional_enum,
};

const SELECT_COLS: &str = "id, title, description, category, status, location, date_found, \
     image_url, user_id, custody_status, admin_notes, contact_info, created_at, updated_at";

fn row_to_item(row: &libsql::Row) -> Result<Item, DatabaseError> {
    Ok(Item {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        location: row.get(5)?,
        date_found: parse_date(&row.get::<String>(6)?)?,
        image_url: get_opt_string(row, 7)?,
        user_id: row.get(8)?,
        custody_status: parse_optional_enum(get_opt_string(row, 9)?.as_deref())?,
        admin_notes: get_opt_string(row, 10)?,
        contact_info: get_opt_string(row, 11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
        updated_at: parse_datetime(&row.get::<String>(13)?)?,
    })
}

impl LnfDb {
    /// Items matching `filter`, newest first.
    ///
    /// Status and category are pushed into SQL; the text search runs on the
    /// decoded rows so case folding covers non-ASCII titles.
    pub async fn find_items(&self, filter: &ItemFilter) -> Result<Vec<Item>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref excluded) = filter.exclude_status {
            params.push(excluded.as_str().into());
            conditions.push(format!("status != ?{}", params.len()));
        }
        if let Some(ref status) = filter.status {
            params.push(status.as_str().into());
            conditions.push(format!("status = ?{}", params.len()));
        }
        if let Some(ref category) = filter.category {
            params.push(category.clone().into());
            conditions.push(format!("category = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT {SELECT_COLS} FROM items {where_clause} ORDER BY created_at DESC, id DESC"
        );

        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            let item = row_to_item(&row)?;
            // SQLite's lower() only folds ASCII; search is matched in Rust.
            if filter.matches(&item) {
                items.push(item);
            }
        }
        Ok(items)
    }

    pub async fn find_item(&self, id: &str) -> Result<Option<Item>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM items WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_item(&row)?)),
            None => Ok(None),
        }
    }

    /// Insert an item and return it as stored.
    pub async fn insert_item(&self, item: &Item) -> Result<Item, DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO items (id, title, description, category, status, location, date_found,
                    image_url, user_id, custody_status, admin_notes, contact_info, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                libsql::params![
                    item.id.as_str(),
                    item.title.as_str(),
                    item.description.as_str(),
                    item.category.as_str(),
                    item.status.as_str(),
                    item.location.as_str(),
                    fmt_date(item.date_found),
                    opt_text(item.image_url.as_deref()),
                    item.user_id.as_str(),
                    opt_text(item.custody_status.map(|c| c.as_str())),
                    opt_text(item.admin_notes.as_deref()),
                    opt_text(item.contact_info.as_deref()),
                    fmt_datetime(&item.created_at),
                    fmt_datetime(&item.updated_at)
                ],
            )
            .await?;
        self.find_item(&item.id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Apply the `Some` fields of `patch` and stamp `updated_at`.
    ///
    /// Returns `None` when no item has this id.
    pub async fn update_item_fields(
        &self,
        id: &str,
        patch: &ItemPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Item>, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        if let Some(ref status) = patch.status {
            sets.push(format!("status = ?{idx}"));
            params.push(status.as_str().into());
            idx += 1;
        }
        if let Some(ref notes) = patch.admin_notes {
            sets.push(format!("admin_notes = ?{idx}"));
            params.push(opt_text(notes.as_deref()));
            idx += 1;
        }
        if let Some(ref location) = patch.location {
            sets.push(format!("location = ?{idx}"));
            params.push(location.clone().into());
            idx += 1;
        }
        if let Some(ref title) = patch.title {
            sets.push(format!("title = ?{idx}"));
            params.push(title.clone().into());
            idx += 1;
        }
        if let Some(ref description) = patch.description {
            sets.push(format!("description = ?{idx}"));
            params.push(description.clone().into());
            idx += 1;
        }
        if let Some(ref category) = patch.category {
            sets.push(format!("category = ?{idx}"));
            params.push(category.clone().into());
            idx += 1;
        }
        if let Some(ref custody) = patch.custody_status {
            sets.push(format!("custody_status = ?{idx}"));
            params.push(opt_text(custody.map(|c| c.as_str())));
            idx += 1;
        }
        if let Some(ref contact) = patch.contact_info {
            sets.push(format!("contact_info = ?{idx}"));
            params.push(opt_text(contact.as_deref()));
            idx += 1;
        }

        sets.push(format!("updated_at = ?{idx}"));
        params.push(fmt_datetime(&updated_at).into());
        idx += 1;

        params.push(id.into());
        let sql = format!("UPDATE items SET {} WHERE id = ?{idx}", sets.join(", "));
        let affected = self
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Ok(None);
        }
        self.find_item(id).await
    }

    /// Delete an item. Images and claims go with it via `ON DELETE CASCADE`.
    pub async fn delete_item(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM items WHERE id = ?1", [id])
            .await?;
        Ok(affected > 0)
    }
}
