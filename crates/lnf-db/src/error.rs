//! Database error types for lnf-db.

use lnf_core::errors::RepoError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

const UNIQUE_FAILED: &str = "UNIQUE constraint failed: ";

impl DatabaseError {
    /// Columns named by a `SQLite` UNIQUE violation, e.g.
    /// `["claims.item_id", "claims.user_id"]`.
    #[must_use]
    pub fn unique_columns(&self) -> Option<Vec<String>> {
        let Self::LibSql(e) = self else {
            return None;
        };
        let message = e.to_string();
        let (_, rest) = message.split_once(UNIQUE_FAILED)?;
        let columns = rest
            .split(", ")
            .map(|col| {
                col.split(|c: char| !(c.is_alphanumeric() || c == '_' || c == '.'))
                    .next()
                    .unwrap_or_default()
                    .to_string()
            })
            .take_while(|col| !col.is_empty())
            .collect::<Vec<_>>();
        (!columns.is_empty()).then_some(columns)
    }

    /// True when `SQLite` rejected the write on a UNIQUE constraint.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        self.unique_columns().is_some()
    }

    /// True when the violated constraint is a table's `id` primary key.
    #[must_use]
    pub fn is_id_collision(&self) -> bool {
        self.unique_columns()
            .is_some_and(|cols| matches!(cols.as_slice(), [col] if col.ends_with(".id")))
    }
}

impl From<DatabaseError> for RepoError {
    fn from(err: DatabaseError) -> Self {
        if err.is_id_collision() {
            return Self::IdCollision(err.to_string());
        }
        if err.is_unique_violation() {
            return Self::Unique(err.to_string());
        }
        match err {
            DatabaseError::Other(e) => Self::Other(e),
            other => Self::Query(other.to_string()),
        }
    }
}
