//! Wire parsing for the member/class graph.
//!
//! Members are parsed strictly; classes leniently. A malformed class is
//! logged and skipped so one broken course never takes down the refresh
//! for every sibling class and member.

use classwatch_core::{
    parse_wire_timestamp, Class, CompetencyDocument, Member, MemberId, Session,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::error::ClientError;

// ============================================================================
// Raw Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawMember {
    member_id: MemberId,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    classes: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawClass {
    class_id: u32,
    class_name: String,
    #[serde(default)]
    sessions_attended: u32,
    #[serde(default)]
    total_sessions: u32,
    #[serde(default)]
    next_session: Option<String>,
    #[serde(default)]
    sessions: Vec<RawSession>,
    #[serde(default)]
    competencies: Option<CompetencyDocument>,
}

#[derive(Debug, Deserialize)]
struct RawSession {
    session_id: String,
    start: String,
    end: String,
}

// ============================================================================
// Conversion
// ============================================================================

/// Parses the members endpoint body into the domain graph.
///
/// # Errors
///
/// Returns [`ClientError::Json`] if the top-level member list is malformed.
/// Individual classes that fail to decode or convert are skipped with a
/// warning instead.
pub fn parse_members(body: &str) -> Result<Vec<Member>, ClientError> {
    let raw: Vec<RawMember> = serde_json::from_str(body)?;

    let mut members = Vec::with_capacity(raw.len());
    for raw_member in raw {
        let member_id = raw_member.member_id;
        let mut classes = Vec::with_capacity(raw_member.classes.len());

        for class_value in raw_member.classes {
            match convert_class(class_value) {
                Ok(class) => classes.push(class),
                Err(e) => {
                    warn!(member_id, error = %e, "Skipping unreadable class");
                }
            }
        }

        members.push(Member {
            member_id,
            first_name: raw_member.first_name,
            classes,
        });
    }

    Ok(members)
}

fn convert_class(value: Value) -> Result<Class, ClientError> {
    let raw: RawClass = serde_json::from_value(value)?;

    let next_session = raw
        .next_session
        .as_deref()
        .map(parse_wire_timestamp)
        .transpose()
        .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

    let mut sessions = Vec::with_capacity(raw.sessions.len());
    for raw_session in raw.sessions {
        sessions.push(Session {
            start: parse_wire_timestamp(&raw_session.start)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?,
            end: parse_wire_timestamp(&raw_session.end)
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))?,
            session_id: raw_session.session_id,
        });
    }

    Ok(Class {
        class_id: raw.class_id,
        class_name: raw.class_name,
        sessions_attended: raw.sessions_attended,
        total_sessions: raw.total_sessions,
        next_session,
        sessions,
        competencies: raw.competencies.unwrap_or_else(CompetencyDocument::empty),
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"[
        {
            "member_id": 101,
            "first_name": "Alice",
            "classes": [
                {
                    "class_id": 7,
                    "class_name": "Stage 3",
                    "sessions_attended": 5,
                    "total_sessions": 10,
                    "next_session": "2026-08-12 16:30:00",
                    "sessions": [
                        {
                            "session_id": "s-1",
                            "start": "2026-08-12 16:30:00",
                            "end": "2026-08-12 17:00:00"
                        }
                    ],
                    "competencies": {
                        "root": {
                            "id": "root",
                            "label": "Stage 3",
                            "children": [
                                {"id": "c1", "label": "Front crawl 10m"},
                                {"id": "c2", "label": "Back crawl 10m"}
                            ]
                        },
                        "completed": {"101": ["c1"]}
                    }
                }
            ]
        }
    ]"#;

    #[test]
    fn test_parse_full_graph() {
        let members = parse_members(GRAPH).unwrap();
        assert_eq!(members.len(), 1);

        let member = &members[0];
        assert_eq!(member.member_id, 101);
        assert_eq!(member.classes.len(), 1);

        let class = &member.classes[0];
        assert_eq!(class.class_name, "Stage 3");
        assert_eq!(class.sessions.len(), 1);
        assert!(class.next_session.is_some());
        assert!((class.progress_for(101) - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_class_is_skipped() {
        let body = r#"[
            {
                "member_id": 101,
                "first_name": "Alice",
                "classes": [
                    {"class_id": "not a number", "class_name": "Broken"},
                    {"class_id": 2, "class_name": "Fine"}
                ]
            }
        ]"#;
        let members = parse_members(body).unwrap();
        assert_eq!(members[0].classes.len(), 1);
        assert_eq!(members[0].classes[0].class_name, "Fine");
    }

    #[test]
    fn test_bad_timestamp_skips_only_that_class() {
        let body = r#"[
            {
                "member_id": 101,
                "classes": [
                    {"class_id": 1, "class_name": "Bad", "next_session": "garbage"},
                    {"class_id": 2, "class_name": "Good", "next_session": "2026-08-12 16:30:00"}
                ]
            }
        ]"#;
        let members = parse_members(body).unwrap();
        assert_eq!(members[0].classes.len(), 1);
        assert_eq!(members[0].classes[0].class_name, "Good");
    }

    #[test]
    fn test_missing_competencies_defaults_empty() {
        let body = r#"[
            {"member_id": 5, "classes": [{"class_id": 1, "class_name": "NoDoc"}]}
        ]"#;
        let members = parse_members(body).unwrap();
        let class = &members[0].classes[0];
        assert_eq!(class.competencies.total_leaves(), 0);
        assert!((class.progress_for(5) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_top_level_garbage_is_an_error() {
        assert!(parse_members("{\"oops\": true}").is_err());
    }
}
