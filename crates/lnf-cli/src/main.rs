use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use lnf_config::LnfConfig;
use lnf_db::LnfDb;
use lnf_engine::CatalogError;

mod cli;
mod commands;
mod context;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        match error.downcast_ref::<CatalogError>() {
            Some(catalog) => eprintln!("lnf error [{}]: {catalog}", catalog.kind()),
            None => eprintln!("lnf error: {error:#}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();

    if let cli::Commands::Schema(args) = &cli.command {
        return commands::schema::handle(args, &flags);
    }

    let mut config = LnfConfig::load_with_dotenv().context("failed to load configuration")?;
    if let Some(path) = &flags.database {
        config.database.path.clone_from(path);
    }

    let db = LnfDb::open_local(&config.database.path)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))?;
    let ctx = context::AppContext::init(Arc::new(db), &config, flags.token.as_deref()).await?;

    commands::dispatch::dispatch(cli.command, &ctx, &flags).await
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("LNF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
