//! Check command - re-validate stored credentials.

use anyhow::Result;
use classwatch_coordinator::validate_credentials;
use serde_json::json;

use crate::output::to_json_string;
use crate::{Cli, OutputFormat};

/// Runs the check command.
pub async fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let accounts = cli.selected_accounts(&config)?;

    let mut failures = 0usize;
    let mut results = Vec::new();

    for entry in accounts {
        match validate_credentials(entry.credentials()).await {
            Ok(()) => {
                results.push(json!({ "account": entry.id, "status": "ok" }));
                if cli.format == OutputFormat::Text {
                    println!("{}: ok", entry.id);
                }
            }
            Err(e) => {
                failures += 1;
                results.push(json!({
                    "account": entry.id,
                    "status": "error",
                    "error": e.error_key(),
                }));
                if cli.format == OutputFormat::Text {
                    println!("{}: {} ({})", entry.id, e.error_key(), e);
                }
            }
        }
    }

    if cli.format == OutputFormat::Json {
        println!("{}", to_json_string(&results, cli.pretty)?);
    }

    if failures > 0 {
        anyhow::bail!("{failures} account(s) failed validation");
    }
    Ok(())
}
