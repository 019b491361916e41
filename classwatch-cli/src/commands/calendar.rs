//! Calendar command - sessions inside a date window.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use clap::Args;
use classwatch_coordinator::Coordinator;
use classwatch_entity::{
    build_next_session_calendars, build_session_calendars, CalendarEvent,
};

use crate::output::{event_output, to_json_string, EventOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for calendar command.
#[derive(Args)]
pub struct CalendarArgs {
    /// Days ahead to include; the window is (now, now + days).
    #[arg(long, short, default_value = "14")]
    pub days: i64,

    /// Window start, RFC 3339 (overrides --days).
    #[arg(long)]
    pub from: Option<DateTime<Utc>>,

    /// Window end, RFC 3339 (overrides --days).
    #[arg(long)]
    pub to: Option<DateTime<Utc>>,

    /// Show only each class's single next session instead of the window.
    #[arg(long)]
    pub upcoming: bool,
}

/// Runs the calendar command.
pub async fn run(args: &CalendarArgs, cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    let accounts = cli.selected_accounts(&config)?;
    let formatter = TextFormatter::new(!cli.no_color);

    let start = args.from.unwrap_or_else(Utc::now);
    let end = args.to.unwrap_or(start + Duration::days(args.days));
    if end <= start {
        anyhow::bail!("Window end must be after window start");
    }

    let mut collected: Vec<(String, CalendarEvent)> = Vec::new();
    let mut json_events: Vec<EventOutput> = Vec::new();

    for entry in accounts {
        let coordinator = match Coordinator::create(entry.id.clone(), entry.credentials()).await {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{}", formatter.format_error(&entry.id, &e.to_string(), e.requires_reauth()));
                continue;
            }
        };
        if let Err(e) = coordinator.refresh().await {
            eprintln!("{}", formatter.format_error(&entry.id, &e.to_string(), e.requires_reauth()));
            continue;
        }

        if args.upcoming {
            let snapshot = coordinator.snapshot();
            for calendar in build_next_session_calendars(&entry.id, &snapshot) {
                json_events.push(event_output(&entry.id, &calendar.info.name, &calendar.event));
                collected.push((calendar.info.name.clone(), calendar.event));
            }
        } else {
            let members = coordinator.members().await;
            for calendar in build_session_calendars(&entry.id, &members) {
                let name = format!("{} {}", calendar.info.device.name, calendar.info.name);
                for event in calendar.events_between(start, end) {
                    json_events.push(event_output(&entry.id, &name, &event));
                    collected.push((name.clone(), event));
                }
            }
        }
    }

    match cli.format {
        OutputFormat::Text => println!("{}", formatter.format_events(&collected)),
        OutputFormat::Json => println!("{}", to_json_string(&json_events, cli.pretty)?),
    }

    Ok(())
}
