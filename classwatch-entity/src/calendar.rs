//! Session calendars.

use chrono::{DateTime, Utc};
use classwatch_core::{Member, ProgressSnapshot};
use serde::Serialize;

use crate::entity::{slug, EntityInfo};

/// A single calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// Unique event id.
    pub uid: String,
    /// Event title, the class name.
    pub summary: String,
    /// Event start.
    pub start: DateTime<Utc>,
    /// Event end.
    pub end: DateTime<Utc>,
}

// ============================================================================
// Next-Session Calendar
// ============================================================================

/// One calendar entity per class with a booked next session, exposing that
/// single upcoming event. No duration is known for the next session, so
/// the event ends the instant it starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextSessionCalendar {
    /// Entity identity.
    pub info: EntityInfo,
    /// The single upcoming event.
    pub event: CalendarEvent,
}

/// Builds next-session calendars from a snapshot. Classes without a booked
/// next session get no entity.
pub fn build_next_session_calendars(
    account_id: &str,
    snapshot: &ProgressSnapshot,
) -> Vec<NextSessionCalendar> {
    let mut calendars = Vec::new();
    for (member_id, record) in &snapshot.members {
        for class in &record.classes {
            let Some(start) = class.next_session else {
                continue;
            };
            let key = slug(&class.class_name);
            calendars.push(NextSessionCalendar {
                info: EntityInfo::new(
                    account_id,
                    &format!("{member_id}_{key}_next_session"),
                    class.class_name.clone(),
                    *member_id,
                    record.name.clone(),
                ),
                event: CalendarEvent {
                    uid: format!("{member_id}-{key}-next"),
                    summary: class.class_name.clone(),
                    start,
                    end: start,
                },
            });
        }
    }
    calendars
}

// ============================================================================
// Member Session Calendar
// ============================================================================

/// A calendar that displays all of one member's sessions, answered from
/// the live member graph the coordinator retains.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionCalendar {
    /// Entity identity.
    pub info: EntityInfo,
    member: Member,
}

impl SessionCalendar {
    /// Returns every session strictly inside the window, in discovery
    /// order: the member's classes in backend order, each class's sessions
    /// in backend order. Not sorted by time. A session touching either
    /// boundary exactly is excluded.
    pub fn events_between(
        &self,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Vec<CalendarEvent> {
        let mut events = Vec::new();
        for class in &self.member.classes {
            for session in &class.sessions {
                if session.start > start_date && session.end < end_date {
                    events.push(CalendarEvent {
                        uid: session.session_id.clone(),
                        summary: class.class_name.clone(),
                        start: session.start,
                        end: session.end,
                    });
                }
            }
        }
        events
    }
}

/// Builds one session calendar per member from the live graph.
pub fn build_session_calendars(account_id: &str, members: &[Member]) -> Vec<SessionCalendar> {
    members
        .iter()
        .map(|member| SessionCalendar {
            info: EntityInfo::new(
                account_id,
                &format!("{}_sessions", member.member_id),
                "Sessions",
                member.member_id,
                member.display_name(),
            ),
            member: member.clone(),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use classwatch_core::{Class, CompetencyDocument, Session};

    fn utc(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, day, hour, 0, 0).unwrap()
    }

    fn session(id: &str, day: u32, hour: u32) -> Session {
        Session {
            session_id: id.to_string(),
            start: utc(day, hour),
            end: utc(day, hour + 1),
        }
    }

    fn class(name: &str, sessions: Vec<Session>, next: Option<DateTime<Utc>>) -> Class {
        Class {
            class_id: 1,
            class_name: name.to_string(),
            sessions_attended: 0,
            total_sessions: 0,
            next_session: next,
            sessions,
            competencies: CompetencyDocument::empty(),
        }
    }

    fn member_with(classes: Vec<Class>) -> Member {
        Member {
            member_id: 101,
            first_name: Some("Alice".to_string()),
            classes,
        }
    }

    #[test]
    fn test_window_query_is_strictly_exclusive() {
        let member = member_with(vec![class(
            "Stage 3",
            vec![
                session("before", 1, 9),
                session("inside", 10, 9),
                session("after", 20, 9),
            ],
            None,
        )]);
        let calendars = build_session_calendars("acct", &[member]);

        // Window exactly covering "inside" with slack on both sides
        let events = calendars[0].events_between(utc(5, 0), utc(15, 0));
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].uid, "inside");

        // A session starting exactly at the window start is excluded
        let events = calendars[0].events_between(utc(10, 9), utc(15, 0));
        assert!(events.is_empty());

        // A session ending exactly at the window end is excluded
        let events = calendars[0].events_between(utc(5, 0), utc(10, 10));
        assert!(events.is_empty());
    }

    #[test]
    fn test_window_query_preserves_discovery_order() {
        let member = member_with(vec![
            class("Later class", vec![session("b", 12, 9)], None),
            class("Earlier class", vec![session("a", 10, 9)], None),
        ]);
        let calendars = build_session_calendars("acct", &[member]);

        let events = calendars[0].events_between(utc(1, 0), utc(28, 0));
        // class order, not chronological order
        assert_eq!(events[0].uid, "b");
        assert_eq!(events[1].uid, "a");
    }

    #[test]
    fn test_next_session_calendar_uses_placeholder_end() {
        let next = utc(12, 16);
        let member = member_with(vec![
            class("Booked", Vec::new(), Some(next)),
            class("Unbooked", Vec::new(), None),
        ]);
        let snapshot = ProgressSnapshot::from_members(&[member]);

        let calendars = build_next_session_calendars("acct", &snapshot);
        assert_eq!(calendars.len(), 1);
        assert_eq!(calendars[0].event.start, next);
        assert_eq!(calendars[0].event.end, next);
        assert_eq!(calendars[0].event.summary, "Booked");
    }
}
