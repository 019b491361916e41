// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Classwatch CLI - course progress monitoring from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Configure an account (validates against the instance first)
//! classwatch setup --instance https://swim.example.org \
//!     --username parent@example.org --password secret
//!
//! # One-shot progress summary for every account
//! classwatch summary
//!
//! # Upcoming sessions in the next two weeks
//! classwatch calendar --days 14
//!
//! # JSON output
//! classwatch summary --format json --pretty
//!
//! # Watch mode, refreshing every 15 minutes
//! classwatch watch --interval 900
//!
//! # Re-validate stored credentials
//! classwatch check
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use classwatch_store::{AccountEntry, Config};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{accounts, calendar, check, setup, summary, watch};

// ============================================================================
// CLI Definition
// ============================================================================

/// Classwatch CLI - course progress monitoring.
#[derive(Parser)]
#[command(name = "classwatch")]
#[command(about = "Course progress monitoring CLI")]
#[command(long_about = r#"
Classwatch polls a course-progress instance and renders each member's
class progress and upcoming sessions.

Examples:
  classwatch setup --instance URL --username U --password P
  classwatch                     # Summary for all accounts
  classwatch calendar --days 7   # Sessions in the next week
  classwatch watch               # Periodic refresh, like htop
  classwatch --format json       # JSON output
"#)]
#[command(version)]
#[command(author = "Classwatch Contributors")]
pub struct Cli {
    /// Subcommand to run. If none, runs 'summary' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Account to operate on (default: all configured accounts).
    #[arg(long, short, global = true)]
    pub account: Option<String>,

    /// Path to the config file (default: the platform config directory).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Validate credentials and store a new account.
    Setup(setup::SetupArgs),

    /// List or remove configured accounts.
    #[command(visible_alias = "a")]
    Accounts(accounts::AccountsArgs),

    /// Refresh once and show progress for every member (default).
    #[command(visible_alias = "s")]
    Summary,

    /// Show sessions inside a date window.
    #[command(visible_alias = "cal")]
    Calendar(calendar::CalendarArgs),

    /// Watch for changes on a fixed refresh interval.
    #[command(visible_alias = "w")]
    Watch(watch::WatchArgs),

    /// Re-validate the stored credentials of every account.
    Check,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Loads the configuration, honoring `--config`.
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        Ok(config)
    }

    /// Saves the configuration, honoring `--config`.
    pub fn save_config(&self, config: &Config) -> Result<()> {
        match &self.config {
            Some(path) => config.save_to(path)?,
            None => config.save()?,
        }
        Ok(())
    }

    /// Resolves which accounts a command operates on.
    pub fn selected_accounts<'a>(&self, config: &'a Config) -> Result<Vec<&'a AccountEntry>> {
        match &self.account {
            Some(id) => {
                let entry = config
                    .account(id)
                    .ok_or_else(|| anyhow::anyhow!("Unknown account: {id}"))?;
                Ok(vec![entry])
            }
            None => {
                if config.accounts.is_empty() {
                    anyhow::bail!("No accounts configured. Run 'classwatch setup' first.");
                }
                Ok(config.accounts.iter().collect())
            }
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("classwatch=debug,info")
    } else {
        EnvFilter::new("classwatch=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Setup(args)) => setup::run(args, &cli).await,
        Some(Commands::Accounts(args)) => accounts::run(args, &cli),
        Some(Commands::Summary) | None => summary::run(&cli).await,
        Some(Commands::Calendar(args)) => calendar::run(args, &cli).await,
        Some(Commands::Watch(args)) => watch::run(args, &cli).await,
        Some(Commands::Check) => check::run(&cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e}");
        }
        std::process::exit(1);
    }

    Ok(())
}
