use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

use arise::config::Config;
use arise::store::Store;

#[derive(Parser)]
#[command(name = "arise")]
#[command(about = "Arise - hunter-style fitness progression")]
#[command(version)]
struct Cli {
    /// Path to the progression database (defaults to ~/.arise/arise.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create your player profile and reveal your starting stats
    Onboard(cli::onboard::OnboardArgs),

    /// Record a completed workout and show what it earned
    Complete(cli::complete::CompleteArgs),

    /// Show level, rank, streak and XP progress
    Status,

    /// List daily and weekly quests
    Quests,

    /// List achievements and unlock progress
    Achievements,

    /// Show recent XP ledger entries
    History {
        /// Number of entries to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = Config::load()?;
    let db_path = cli.db.unwrap_or_else(|| config.db_path());
    let store = Store::open(&db_path)?;

    match cli.command {
        Commands::Onboard(args) => cli::onboard::onboard_command(&store, &config, args)?,
        Commands::Complete(args) => cli::complete::complete_command(&store, args)?,
        Commands::Status => cli::status::status_command(&store)?,
        Commands::Quests => cli::quests::quests_command(&store)?,
        Commands::Achievements => cli::achievements::achievements_command(&store)?,
        Commands::History { limit } => cli::history::history_command(&store, limit)?,
    }

    Ok(())
}
