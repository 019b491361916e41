//! Watch command - periodic refresh, like htop for course progress.

use std::io::{stdout, Write};
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use classwatch_coordinator::{AccountRegistry, Coordinator};
use classwatch_entity::{build_class_sensors, build_member_sensors};
use tokio::time::{interval, Duration};
use tracing::info;

use crate::output::TextFormatter;
use crate::Cli;

/// Arguments for watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Refresh interval in seconds (default: the configured
    /// refresh_interval, nominally hourly).
    #[arg(long, short)]
    pub interval: Option<u64>,

    /// Minimum interval to use.
    #[arg(long, default_value = "60")]
    pub min_interval: u64,
}

/// Runs the watch command.
pub async fn run(args: &WatchArgs, cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let accounts = cli.selected_accounts(&config)?;

    let refresh_interval = args
        .interval
        .unwrap_or(config.general.refresh_interval)
        .max(args.min_interval);

    info!(interval = refresh_interval, "Starting watch mode");

    let formatter = TextFormatter::new(!cli.no_color);

    // The registry is the explicit owner of all live coordinators: insert
    // on setup, remove once an account needs re-authentication.
    let registry = AccountRegistry::new();
    for entry in accounts {
        match Coordinator::create(entry.id.clone(), entry.credentials()).await {
            Ok(coordinator) => registry.insert(Arc::new(coordinator)).await,
            Err(e) => {
                eprintln!(
                    "{}",
                    formatter.format_error(&entry.id, &e.to_string(), e.requires_reauth())
                );
            }
        }
    }

    if registry.ids().await.is_empty() {
        anyhow::bail!("No accounts available to watch");
    }

    let mut ticker = interval(Duration::from_secs(refresh_interval));

    // Initial fetch
    ticker.tick().await;

    loop {
        // Clear screen
        print!("\x1b[2J\x1b[H");
        stdout().flush()?;

        // Header
        let now = chrono::Local::now();
        println!(
            "Classwatch Watch Mode - {} (refresh: {}s)",
            now.format("%H:%M:%S"),
            refresh_interval
        );
        println!("{}", "─".repeat(50));
        println!();

        for coordinator in registry.all().await {
            let account_id = coordinator.account_id().to_string();
            match coordinator.refresh().await {
                Ok(()) => {
                    let snapshot = coordinator.snapshot();
                    let members = build_member_sensors(&account_id, &snapshot);
                    let classes = build_class_sensors(&account_id, &snapshot);
                    let refreshed_at = coordinator.last_refresh().await;
                    println!(
                        "{}",
                        formatter.format_account(&account_id, &members, &classes, refreshed_at)
                    );
                }
                Err(e) if e.requires_reauth() => {
                    // Credentials need user attention; unload this account
                    println!(
                        "{}",
                        formatter.format_error(&account_id, &e.to_string(), true)
                    );
                    registry.remove(&account_id).await;
                }
                Err(e) => {
                    // Transient; the retained snapshot is still the last
                    // committed state
                    println!(
                        "{}",
                        formatter.format_error(&account_id, &e.to_string(), false)
                    );
                }
            }
            println!();
        }

        if registry.ids().await.is_empty() {
            anyhow::bail!("All accounts need re-authentication; run 'classwatch setup' again");
        }

        println!("Press Ctrl+C to exit");

        // Wait for next tick
        ticker.tick().await;
    }
}
