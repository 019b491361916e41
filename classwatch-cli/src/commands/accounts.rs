//! Accounts command - list or remove configured accounts.

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::{Cli, OutputFormat};

/// Arguments for accounts command.
#[derive(Args)]
pub struct AccountsArgs {
    /// Action to perform (default: list).
    #[command(subcommand)]
    pub action: Option<AccountsAction>,
}

/// Accounts subcommands.
#[derive(Subcommand)]
pub enum AccountsAction {
    /// List configured accounts.
    List,
    /// Remove an account.
    Remove {
        /// Account id to remove.
        id: String,
    },
}

/// Runs the accounts command.
pub fn run(args: &AccountsArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        Some(AccountsAction::Remove { id }) => {
            let mut config = cli.load_config()?;
            config.remove_account(id)?;
            cli.save_config(&config)?;
            if !cli.quiet {
                println!("Account '{id}' removed.");
            }
            Ok(())
        }
        Some(AccountsAction::List) | None => {
            let config = cli.load_config()?;
            match cli.format {
                OutputFormat::Json => {
                    let list: Vec<serde_json::Value> = config
                        .accounts
                        .iter()
                        .map(|a| {
                            // never echo the password back
                            serde_json::json!({
                                "id": a.id,
                                "instance": a.instance,
                                "username": a.username,
                            })
                        })
                        .collect();
                    println!("{}", crate::output::to_json_string(&list, cli.pretty)?);
                }
                OutputFormat::Text => {
                    if config.accounts.is_empty() {
                        println!("No accounts configured.");
                    }
                    for account in &config.accounts {
                        println!(
                            "{}  {} ({})",
                            account.id, account.instance, account.username
                        );
                    }
                }
            }
            Ok(())
        }
    }
}
