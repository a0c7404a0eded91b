//! # lnf-db
//!
//! libSQL storage backend for the lost-and-found catalog.
//!
//! `LnfDb` implements the `Repository` and `IdentityResolver` ports from
//! `lnf-core`. Each table gets its own module under [`repos`] adding methods
//! to `LnfDb` via `impl LnfDb` blocks; [`repository`] wires them into the
//! port traits and converts errors.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
mod repository;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for catalog state.
pub struct LnfDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl LnfDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Per-connection in SQLite; the cascades depend on it.
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let lnf_db = Self { db, conn };
        lnf_db.run_migrations().await?;
        tracing::debug!(path, "catalog database opened");
        Ok(lnf_db)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"itm-a3f8b2c1"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_support::test_db;

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        let tables = [
            "users",
            "api_tokens",
            "categories",
            "items",
            "item_images",
            "claims",
            "notifications",
            "audit_log",
        ];
        for table in &tables {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            assert!(rows.next().await.unwrap().is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn generate_id_correct_format() {
        let db = test_db().await;
        let id = db.generate_id("itm").await.unwrap();
        assert!(id.starts_with("itm-"), "ID should start with 'itm-': {id}");
        assert_eq!(id.len(), 12, "3 prefix + 1 dash + 8 hex: {id}");
        assert!(id[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn generate_id_all_prefixes_unique() {
        let db = test_db().await;
        let mut ids = HashSet::new();
        for prefix in lnf_core::ids::ALL_PREFIXES {
            for _ in 0..20 {
                let id = db.generate_id(prefix).await.unwrap();
                assert!(id.starts_with(&format!("{prefix}-")));
                assert!(ids.insert(id.clone()), "Duplicate ID generated: {id}");
            }
        }
    }

    #[tokio::test]
    async fn file_database_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lnf.db");
        let path = path.to_str().unwrap();

        {
            let db = LnfDb::open_local(path).await.unwrap();
            test_support::seed_user(&db, "usr-ana", "Ana", lnf_core::enums::UserRole::Admin).await;
        }

        let reopened = LnfDb::open_local(path).await.unwrap();
        let user = reopened.find_user("usr-ana").await.unwrap().unwrap();
        assert_eq!(user.name, "Ana");
        assert_eq!(reopened.list_categories().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
        let categories = db.list_categories().await.unwrap();
        assert_eq!(categories.len(), 6, "seed rows must not duplicate");
    }
}
