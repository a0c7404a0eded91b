use clap::Subcommand;

/// Claim commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ClaimCommands {
    /// Claim an item as yours.
    Submit {
        item_id: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Approve, deny, or verify a claim (admin).
    Review {
        id: String,
        /// approved, denied, or verified
        decision: String,
    },
}
