//! Claim repository. `(item_id, user_id)` is UNIQUE in the schema.

use lnf_core::entities::Claim;
use lnf_core::enums::ClaimStatus;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_opt_string, opt_text, parse_datetime, parse_enum};

const SELECT_COLS: &str = "id, item_id, user_id, message, status, created_at";

fn row_to_claim(row: &libsql::Row) -> Result<Claim, DatabaseError> {
    Ok(Claim {
        id: row.get(0)?,
        item_id: row.get(1)?,
        user_id: row.get(2)?,
        message: get_opt_string(row, 3)?,
        status: parse_enum(&row.get::<String>(4)?)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl LnfDb {
    async fn query_one_claim(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Option<Claim>, DatabaseError> {
        let mut rows = self.conn().query(sql, params).await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_claim(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn find_claim(
        &self,
        item_id: &str,
        user_id: &str,
    ) -> Result<Option<Claim>, DatabaseError> {
        self.query_one_claim(
            &format!("SELECT {SELECT_COLS} FROM claims WHERE item_id = ?1 AND user_id = ?2"),
            libsql::params![item_id, user_id],
        )
        .await
    }

    pub async fn find_claim_by_id(&self, id: &str) -> Result<Option<Claim>, DatabaseError> {
        self.query_one_claim(
            &format!("SELECT {SELECT_COLS} FROM claims WHERE id = ?1"),
            [id],
        )
        .await
    }

    /// Insert a claim. A second claim for the same item and user fails with a
    /// UNIQUE violation (see [`DatabaseError::is_unique_violation`]).
    pub async fn insert_claim(&self, claim: &Claim) -> Result<Claim, DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO claims (id, item_id, user_id, message, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    claim.id.as_str(),
                    claim.item_id.as_str(),
                    claim.user_id.as_str(),
                    opt_text(claim.message.as_deref()),
                    claim.status.as_str(),
                    fmt_datetime(&claim.created_at)
                ],
            )
            .await?;
        self.find_claim_by_id(&claim.id)
            .await?
            .ok_or(DatabaseError::NoResult)
    }

    pub async fn update_claim_status(
        &self,
        id: &str,
        status: ClaimStatus,
    ) -> Result<Option<Claim>, DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "UPDATE claims SET status = ?1 WHERE id = ?2",
                libsql::params![status.as_str(), id],
            )
            .await?;
        if affected == 0 {
            return Ok(None);
        }
        self.find_claim_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use lnf_core::enums::{ItemStatus, UserRole};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{item, seed_user, test_db};

    fn claim(id: &str) -> Claim {
        Claim {
            id: id.to_string(),
            item_id: "itm-1".to_string(),
            user_id: "usr-2".to_string(),
            message: Some("It has my name inside".to_string()),
            status: ClaimStatus::Pending,
            created_at: Utc::now(),
        }
    }

    async fn seeded() -> LnfDb {
        let db = test_db().await;
        seed_user(&db, "usr-1", "Finder", UserRole::User).await;
        seed_user(&db, "usr-2", "Owner", UserRole::User).await;
        db.insert_item(&item("itm-1", "usr-1", "Wallet", ItemStatus::Found))
            .await
            .unwrap();
        db
    }

    #[tokio::test]
    async fn insert_then_find_by_pair() {
        let db = seeded().await;
        let stored = db.insert_claim(&claim("clm-1")).await.unwrap();
        let found = db.find_claim("itm-1", "usr-2").await.unwrap().unwrap();
        assert_eq!(stored, found);
        assert_eq!(db.find_claim("itm-1", "usr-1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_pair_is_unique_violation() {
        let db = seeded().await;
        db.insert_claim(&claim("clm-1")).await.unwrap();
        let err = db.insert_claim(&claim("clm-2")).await.unwrap_err();
        assert!(err.is_unique_violation(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn status_update_roundtrip() {
        let db = seeded().await;
        db.insert_claim(&claim("clm-1")).await.unwrap();
        let updated = db
            .update_claim_status("clm-1", ClaimStatus::Approved)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, ClaimStatus::Approved);
        assert_eq!(
            db.update_claim_status("clm-missing", ClaimStatus::Denied)
                .await
                .unwrap(),
            None
        );
    }
}
