//! Summary command - one refresh, then progress for every member.

use anyhow::Result;
use chrono::{DateTime, Utc};
use classwatch_coordinator::Coordinator;
use classwatch_core::ProgressSnapshot;
use classwatch_entity::{build_class_sensors, build_member_sensors};
use classwatch_store::AccountEntry;

use crate::output::{account_output, to_json_string, AccountOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the summary command.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let accounts = cli.selected_accounts(&config)?;
    let formatter = TextFormatter::new(!cli.no_color);

    let mut outputs: Vec<AccountOutput> = Vec::new();

    for entry in accounts {
        match refresh_once(entry).await {
            Ok((snapshot, refreshed_at)) => match cli.format {
                OutputFormat::Text => {
                    let members = build_member_sensors(&entry.id, &snapshot);
                    let classes = build_class_sensors(&entry.id, &snapshot);
                    println!(
                        "{}",
                        formatter.format_account(&entry.id, &members, &classes, refreshed_at)
                    );
                    println!();
                }
                OutputFormat::Json => {
                    outputs.push(account_output(&entry.id, &snapshot, refreshed_at, None));
                }
            },
            Err((message, reauth)) => match cli.format {
                OutputFormat::Text => {
                    println!("{}", formatter.format_error(&entry.id, &message, reauth));
                    println!();
                }
                OutputFormat::Json => {
                    outputs.push(account_output(
                        &entry.id,
                        &ProgressSnapshot::new(),
                        None,
                        Some(message),
                    ));
                }
            },
        }
    }

    if cli.format == OutputFormat::Json {
        println!("{}", to_json_string(&outputs, cli.pretty)?);
    }

    Ok(())
}

/// Creates a coordinator for the account and refreshes once. Failures are
/// reported per account; one bad account never aborts the others.
async fn refresh_once(
    entry: &AccountEntry,
) -> Result<(ProgressSnapshot, Option<DateTime<Utc>>), (String, bool)> {
    let coordinator = Coordinator::create(entry.id.clone(), entry.credentials())
        .await
        .map_err(|e| (e.to_string(), e.requires_reauth()))?;

    coordinator
        .refresh()
        .await
        .map_err(|e| (e.to_string(), e.requires_reauth()))?;

    let refreshed_at = coordinator.last_refresh().await;
    Ok((coordinator.snapshot(), refreshed_at))
}
