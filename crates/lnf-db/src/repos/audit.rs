//! Audit log repository.
//!
//! Append-only entries recording every catalog mutation.

use lnf_core::entities::AuditEntry;
use lnf_core::filters::AuditFilter;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_opt_string, parse_datetime, parse_enum, parse_optional_json};

impl LnfDb {
    /// Append an audit entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn insert_audit_entry(&self, entry: &AuditEntry) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO audit_log (id, user_id, action, resource_type, resource_id, detail, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    entry.id.as_str(),
                    entry.user_id.as_str(),
                    entry.action.as_str(),
                    entry.resource_type.as_str(),
                    entry.resource_id.as_str(),
                    entry.detail.as_ref().map(std::string::ToString::to_string),
                    fmt_datetime(&entry.created_at)
                ],
            )
            .await?;
        Ok(())
    }

    /// Query audit entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_audit_entries(
        &self,
        filter: &AuditFilter,
    ) -> Result<Vec<AuditEntry>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref uid) = filter.user_id {
            params.push(libsql::Value::Text(uid.clone()));
            conditions.push(format!("user_id = ?{}", params.len()));
        }
        if let Some(ref action) = filter.action {
            params.push(libsql::Value::Text(action.as_str().to_string()));
            conditions.push(format!("action = ?{}", params.len()));
        }
        if let Some(ref rt) = filter.resource_type {
            params.push(libsql::Value::Text(rt.as_str().to_string()));
            conditions.push(format!("resource_type = ?{}", params.len()));
        }
        if let Some(ref rid) = filter.resource_id {
            params.push(libsql::Value::Text(rid.clone()));
            conditions.push(format!("resource_id = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let limit = filter.limit.unwrap_or(100);
        let sql = format!(
            "SELECT id, user_id, action, resource_type, resource_id, detail, created_at
             FROM audit_log {where_clause}
             ORDER BY created_at DESC, id DESC LIMIT {limit}"
        );

        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(AuditEntry {
                id: row.get::<String>(0)?,
                user_id: row.get::<String>(1)?,
                action: parse_enum(&row.get::<String>(2)?)?,
                resource_type: parse_enum(&row.get::<String>(3)?)?,
                resource_id: row.get::<String>(4)?,
                detail: parse_optional_json(get_opt_string(&row, 5)?.as_deref())?,
                created_at: parse_datetime(&row.get::<String>(6)?)?,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lnf_core::enums::{AuditAction, ResourceType};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::test_db;

    fn entry(id: &str, action: AuditAction, resource_id: &str) -> AuditEntry {
        AuditEntry {
            id: id.to_string(),
            user_id: "usr-1".to_string(),
            action,
            resource_type: ResourceType::Item,
            resource_id: resource_id.to_string(),
            detail: Some(serde_json::json!({ "title": "Wallet" })),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn filter_by_action_and_resource() {
        let db = test_db().await;
        db.insert_audit_entry(&entry("aud-1", AuditAction::CreateItem, "itm-1"))
            .await
            .unwrap();
        db.insert_audit_entry(&entry("aud-2", AuditAction::ClaimItem, "itm-1"))
            .await
            .unwrap();
        db.insert_audit_entry(&entry("aud-3", AuditAction::ClaimItem, "itm-2"))
            .await
            .unwrap();

        let filter = AuditFilter {
            action: Some(AuditAction::ClaimItem),
            resource_id: Some("itm-1".into()),
            ..Default::default()
        };
        let hits = db.list_audit_entries(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "aud-2");
        assert_eq!(hits[0].detail, Some(serde_json::json!({ "title": "Wallet" })));
    }

    #[tokio::test]
    async fn limit_is_applied() {
        let db = test_db().await;
        for i in 0..5 {
            db.insert_audit_entry(&entry(&format!("aud-{i}"), AuditAction::UpdateItem, "itm-1"))
                .await
                .unwrap();
        }
        let filter = AuditFilter {
            limit: Some(2),
            ..Default::default()
        };
        assert_eq!(db.list_audit_entries(&filter).await.unwrap().len(), 2);
    }
}
