mod claim;
mod item;
mod notification;
mod user;

pub use claim::ClaimCommands;
pub use item::ItemCommands;
pub use notification::NotificationCommands;
pub use user::UserCommands;
