//! JSON output formatting.

use chrono::{DateTime, Utc};
use classwatch_core::{MemberId, ProgressSnapshot};
use classwatch_entity::{round_percent, CalendarEvent};
use serde::Serialize;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one account.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOutput {
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refreshed_at: Option<DateTime<Utc>>,
    pub members: Vec<MemberOutput>,
}

/// JSON output for one member.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberOutput {
    pub member_id: MemberId,
    pub name: String,
    pub progress: f64,
    pub classes: Vec<ClassOutput>,
}

/// JSON output for one class.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassOutput {
    pub class_name: String,
    pub progress: f64,
    pub sessions_completed: u32,
    pub total_sessions: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_session: Option<DateTime<Utc>>,
}

/// JSON output for one calendar event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventOutput {
    pub account: String,
    pub calendar: String,
    pub uid: String,
    pub summary: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

// ============================================================================
// Builders
// ============================================================================

/// Builds the JSON mirror of one account's snapshot.
pub fn account_output(
    account: &str,
    snapshot: &ProgressSnapshot,
    refreshed_at: Option<DateTime<Utc>>,
    error: Option<String>,
) -> AccountOutput {
    let members = snapshot
        .members
        .iter()
        .map(|(member_id, record)| MemberOutput {
            member_id: *member_id,
            name: record.name.clone(),
            progress: round_percent(record.progress),
            classes: record
                .classes
                .iter()
                .map(|class| ClassOutput {
                    class_name: class.class_name.clone(),
                    progress: round_percent(class.progress),
                    sessions_completed: class.sessions_completed,
                    total_sessions: class.total_sessions,
                    next_session: class.next_session,
                })
                .collect(),
        })
        .collect();

    AccountOutput {
        account: account.to_string(),
        error,
        refreshed_at,
        members,
    }
}

/// Builds the JSON mirror of one calendar event.
pub fn event_output(account: &str, calendar: &str, event: &CalendarEvent) -> EventOutput {
    EventOutput {
        account: account.to_string(),
        calendar: calendar.to_string(),
        uid: event.uid.clone(),
        summary: event.summary.clone(),
        start: event.start,
        end: event.end,
    }
}
