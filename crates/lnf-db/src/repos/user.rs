//! User repository, including the per-user item counts for the admin list.

use lnf_core::entities::{User, UserStats};
use lnf_core::filters::UserFilter;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_count, parse_datetime, parse_enum};

const SELECT_COLS: &str = "id, name, email, role, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl LnfDb {
    pub async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    /// Case-insensitive lookup by email.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE lower(email) = lower(?1)"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn insert_user(&self, user: &User) -> Result<User, DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO users (id, name, email, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    user.id.as_str(),
                    user.name.as_str(),
                    user.email.as_str(),
                    user.role.as_str(),
                    fmt_datetime(&user.created_at)
                ],
            )
            .await?;
        self.find_user(&user.id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Users with counts of the items they reported, newest first.
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Vec<UserStats>, DatabaseError> {
        let mut conditions = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref role) = filter.role {
            params.push(role.as_str().into());
            conditions.push(format!("u.role = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };
        let sql = format!(
            "SELECT u.id, u.name, u.email, u.role, u.created_at,
                    COUNT(i.id),
                    COALESCE(SUM(CASE WHEN i.status = 'lost' THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN i.status = 'found' THEN 1 ELSE 0 END), 0),
                    COALESCE(SUM(CASE WHEN i.status = 'returned' THEN 1 ELSE 0 END), 0)
             FROM users u
             LEFT JOIN items i ON i.user_id = u.id
             {where_clause}
             GROUP BY u.id
             ORDER BY u.created_at DESC, u.id DESC"
        );

        let mut rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            let user = row_to_user(&row)?;
            if !filter.matches(&user) {
                continue;
            }
            users.push(UserStats {
                user,
                item_count: get_count(&row, 5)?,
                lost_count: get_count(&row, 6)?,
                found_count: get_count(&row, 7)?,
                returned_count: get_count(&row, 8)?,
            });
        }
        Ok(users)
    }

    /// Delete a user. Their items, claims, tokens, and notifications cascade.
    pub async fn delete_user(&self, id: &str) -> Result<bool, DatabaseError> {
        let affected = self
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", [id])
            .await?;
        Ok(affected > 0)
    }
}
