//! Item image repository.

use lnf_core::entities::ItemImage;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::{fmt_datetime, parse_datetime};

fn row_to_image(row: &libsql::Row) -> Result<ItemImage, DatabaseError> {
    Ok(ItemImage {
        id: row.get(0)?,
        item_id: row.get(1)?,
        image_url: row.get(2)?,
        image_type: row.get(3)?,
        is_primary: row.get::<i64>(4)? != 0,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl LnfDb {
    pub async fn insert_item_image(&self, image: &ItemImage) -> Result<(), DatabaseError> {
        self.conn()
            .execute(
                "INSERT INTO item_images (id, item_id, image_url, image_type, is_primary, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    image.id.as_str(),
                    image.item_id.as_str(),
                    image.image_url.as_str(),
                    image.image_type.as_str(),
                    i64::from(image.is_primary),
                    fmt_datetime(&image.created_at)
                ],
            )
            .await?;
        Ok(())
    }

    /// Images of one item, primary first, then oldest first.
    pub async fn find_item_images(&self, item_id: &str) -> Result<Vec<ItemImage>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                "SELECT id, item_id, image_url, image_type, is_primary, created_at
                 FROM item_images WHERE item_id = ?1
                 ORDER BY is_primary DESC, created_at ASC, id ASC",
                [item_id],
            )
            .await?;
        let mut images = Vec::new();
        while let Some(row) = rows.next().await? {
            images.push(row_to_image(&row)?);
        }
        Ok(images)
    }
}
