mod cli;

use clap::Parser;
use cli::{Cli, Commands, RunArgs};
use stallsweep::config::Config;
use stallsweep::sweep;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => run(args).await?,
    }

    Ok(())
}

async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut config = match args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };

    if let Some(path) = args.history {
        config.history.path = path;
    }

    let report = sweep::run(&config).await?;

    if !report.skipped_warmup {
        info!(
            tracked = report.tracked,
            removed = report.removed.len(),
            failures = report.removal_failures,
            "Sweep complete"
        );
    }

    Ok(())
}
