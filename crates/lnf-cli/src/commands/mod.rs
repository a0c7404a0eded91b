pub mod audit;
pub mod categories;
pub mod claim;
pub mod dispatch;
pub mod item;
pub mod notification;
pub mod schema;
pub mod shared;
pub mod user;
