use clap::Subcommand;

/// User account commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UserCommands {
    /// Register a user and print an API token for them.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// user or admin (default user)
        #[arg(long, default_value = "user")]
        role: String,
    },
    /// List users with item counts (admin).
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete a user and everything they reported (admin).
    Delete { id: String },
}
