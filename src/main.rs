use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "learnit")]
#[command(about = "LearnIT gamification client - XP, levels, streaks and badges")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.learnit/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL from the config
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Override the session token from the config
    #[arg(long, global = true)]
    token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the session and show XP, level, streak and badges
    Stats,

    /// Record a completed lesson and show the award
    LessonComplete,

    /// Count today's activity towards the daily streak
    Streak,

    /// Show the XP leaderboard
    Leaderboard {
        /// Number of entries to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show level and progress for an XP amount (offline)
    Level {
        /// Total XP
        xp: u64,
    },

    /// Write a default ~/.learnit/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    match cli.command {
        Commands::Init { force } => {
            cli::init::init_command(cli.config, force)?;
        }
        Commands::Level { xp } => {
            cli::level::level_command(xp);
        }
        command => {
            let config = cli::session::load_config(cli.config.as_deref())?
                .with_overrides(cli.api_url, cli.token);
            match command {
                Commands::Stats => cli::stats::stats_command(&config).await?,
                Commands::LessonComplete => cli::lesson::lesson_complete_command(&config).await?,
                Commands::Streak => cli::streak::streak_command(&config).await?,
                Commands::Leaderboard { limit } => {
                    cli::leaderboard::leaderboard_command(&config, limit).await?
                }
                Commands::Init { .. } | Commands::Level { .. } => {}
            }
        }
    }

    Ok(())
}
