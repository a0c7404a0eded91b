use clap::Subcommand;

/// Notification commands.
#[derive(Clone, Debug, Subcommand)]
pub enum NotificationCommands {
    /// List the caller's notifications, newest first.
    List {
        #[arg(long)]
        unread: bool,
    },
    /// Mark a notification as read.
    Read { id: String },
}
