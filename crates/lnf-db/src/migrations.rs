//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` / `OR IGNORE` so
//! re-running is harmless.

use crate::LnfDb;
use crate::error::DatabaseError;

/// Users, tokens, categories (seeded), items, images, claims, notifications, audit log.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");

impl LnfDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        Ok(())
    }
}
