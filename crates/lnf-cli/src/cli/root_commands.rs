use clap::{Args, Subcommand};

use crate::cli::subcommands::{ClaimCommands, ItemCommands, NotificationCommands, UserCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Lost and found items.
    Item {
        #[command(subcommand)]
        action: ItemCommands,
    },
    /// Ownership claims.
    Claim {
        #[command(subcommand)]
        action: ClaimCommands,
    },
    /// User accounts (admin).
    User {
        #[command(subcommand)]
        action: UserCommands,
    },
    /// The caller's notifications.
    Notifications {
        #[command(subcommand)]
        action: NotificationCommands,
    },
    /// List item categories.
    Categories,
    /// Query the audit log (admin).
    Audit(AuditArgs),
    /// Print the JSON schema of a response type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Filter by acting user ID.
    #[arg(long)]
    pub user: Option<String>,
    /// Filter by action (e.g. `claim_item`).
    #[arg(long)]
    pub action: Option<String>,
    /// Filter by resource type (item, claim, user).
    #[arg(long = "resource-type")]
    pub resource_type: Option<String>,
    /// Filter by resource ID.
    #[arg(long)]
    pub resource: Option<String>,
    /// Max entries to return (default 100).
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name: item, item-page, item-detail, claim, notification, user, audit-entry
    pub type_name: String,
}
