//! API token storage backing the `IdentityResolver` port.

use lnf_core::identity::Identity;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::parse_enum;

impl LnfDb {
    /// Issue a fresh opaque token for `user_id`.
    pub async fn issue_token(&self, user_id: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT lower(hex(randomblob(16)))", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let token: String = row.get(0)?;

        self.conn()
            .execute(
                "INSERT INTO api_tokens (token, user_id) VALUES (?1, ?2)",
                libsql::params![token.as_str(), user_id],
            )
            .await?;
        tracing::debug!(user_id, "api token issued");
        Ok(token)
    }

    /// Resolve a token to the owning user's identity. `None` for unknown tokens.
    pub async fn resolve_token(&self, token: &str) -> Result<Option<Identity>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT u.id, u.role FROM api_tokens t
                 JOIN users u ON u.id = t.user_id
                 WHERE t.token = ?1",
                [token],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(Identity::new(
                row.get::<String>(0)?,
                parse_enum(&row.get::<String>(1)?)?,
            ))),
            None => Ok(None),
        }
    }
}
