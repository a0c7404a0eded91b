use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `lnf` binary.
#[derive(Debug, Parser)]
#[command(name = "lnf", version, about = "Campus lost-and-found catalog")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// API token identifying the caller (defaults to $LNF_TOKEN)
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Database path (overrides database.path from config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            token: self
                .token
                .clone()
                .or_else(|| std::env::var("LNF_TOKEN").ok())
                .filter(|t| !t.trim().is_empty()),
            database: self.db.clone(),
        }
    }
}
