//! Category lookup. The table is seeded by the initial migration.

use lnf_core::entities::Category;

use crate::LnfDb;
use crate::error::DatabaseError;
use crate::helpers::get_opt_string;

impl LnfDb {
    pub async fn list_categories(&self) -> Result<Vec<Category>, DatabaseError> {
        let mut rows = self
            .conn()
            .query("SELECT name, description FROM categories ORDER BY name", ())
            .await?;
        let mut categories = Vec::new();
        while let Some(row) = rows.next().await? {
            categories.push(Category {
                name: row.get(0)?,
                description: get_opt_string(&row, 1)?,
            });
        }
        Ok(categories)
    }
}
