//! Setup command - validate credentials and store a new account.

use anyhow::Result;
use clap::Args;
use classwatch_client::AccountCredentials;
use classwatch_coordinator::validate_credentials;
use classwatch_store::AccountEntry;
use tracing::info;

use crate::Cli;

/// Arguments for setup command.
#[derive(Args)]
pub struct SetupArgs {
    /// Base URL of the course-progress instance.
    #[arg(long)]
    pub instance: String,

    /// Login username.
    #[arg(long)]
    pub username: String,

    /// Login password.
    #[arg(long)]
    pub password: String,

    /// Account id to store the entry under (default: the username).
    #[arg(long)]
    pub id: Option<String>,
}

/// Runs the setup command.
pub async fn run(args: &SetupArgs, cli: &Cli) -> Result<()> {
    let credentials = AccountCredentials {
        instance: args.instance.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
    };

    if let Err(e) = validate_credentials(credentials).await {
        anyhow::bail!("Validation failed ({}): {e}", e.error_key());
    }

    let id = args.id.clone().unwrap_or_else(|| args.username.clone());

    let mut config = cli.load_config()?;
    config.add_account(AccountEntry {
        id: id.clone(),
        instance: args.instance.clone(),
        username: args.username.clone(),
        password: args.password.clone(),
    })?;
    cli.save_config(&config)?;

    info!(account = %id, "Account configured");
    if !cli.quiet {
        println!("Account '{id}' configured.");
    }
    Ok(())
}
