//! Notification repository.

use lnf_core::entities::Notification;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, get_opt_string, opt_text, parse_datetime, parse_enum};

fn row_to_notification(row: &libsql::Row) -> Result<Notification, DatabaseError> {
    Ok(Notification {
        id: row.get(0)?,
        user_id: row.get(1)?,
        kind: parse_enum(&row.get::<String>(2)?)?,
        title: row.get(3)?,
        message: row.get(4)?,
        item_id: get_opt_string(row, 5)?,
        is_read: row.get::<i64>(6)? != 0,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

impl LnfDb {
    pub async fn insert_notification(
        &self,
        notification: &Notification,
    ) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO notifications (id, user_id, kind, title, message, item_id, is_read, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    notification.id.as_str(),
                    notification.user_id.as_str(),
                    notification.kind.as_str(),
                    notification.title.as_str(),
                    notification.message.as_str(),
                    opt_text(notification.item_id.as_deref()),
                    i64::from(notification.is_read),
                    fmt_datetime(&notification.created_at)
                ],
            )
            .await?;
        Ok(())
    }

    /// A user's notifications, newest first.
    pub async fn list_notifications(
        &self,
        user_id: &str,
        unread_only: bool,
    ) -> Result<Vec<Notification>, DatabaseError> {
        let unread_clause = if unread_only { "AND is_read = 0" } else { "" };
        let sql = format!(
            "SELECT id, user_id, kind, title, message, item_id, is_read, created_at
             FROM notifications WHERE user_id = ?1 {unread_clause}
             ORDER BY created_at DESC, id DESC"
        );
        let mut rows = self.conn().query(&sql, [user_id]).await?;
        let mut notifications = Vec::new();
        while let Some(row) = rows.next().await? {
            notifications.push(row_to_notification(&row)?);
        }
        Ok(notifications)
    }

    /// Mark one of `user_id`'s notifications read. `false` if none matched.
    pub async fn mark_notification_read(
        &self,
        id: &str,
        user_id: &str,
    ) -> Result<bool, DatabaseError> {
        let affected = self
            .conn()
            .execute(
                "UPDATE notifications SET is_read = 1 WHERE id = ?1 AND user_id = ?2",
                libsql::params![id, user_id],
            )
            .await?;
        Ok(affected > 0)
    }
}
