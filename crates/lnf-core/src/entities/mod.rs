//! Entity structs for all catalog domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `lnf-db` migrations).
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip
//! and schema output.

mod audit;
mod category;
mod claim;
mod image;
mod item;
mod notification;
mod user;

pub use audit::AuditEntry;
pub use category::Category;
pub use claim::Claim;
pub use image::ItemImage;
pub use item::Item;
pub use notification::Notification;
pub use user::{User, UserStats};
