use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stallsweep")]
#[command(about = "Blacklists stalled downloads in a Sonarr queue", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single sweep pass (meant to be invoked from cron or a systemd timer)
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Path to the configuration file (overrides STALLSWEEP_CONFIG)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the history file (overrides the configured location)
    #[arg(long)]
    pub history: Option<PathBuf>,
}
