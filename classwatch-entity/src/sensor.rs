//! Progress sensors.

use chrono::{DateTime, Utc};
use classwatch_core::{CompetencyDocument, MemberId, ProgressSnapshot};
use serde::Serialize;
use serde_json::{json, Value};

use crate::entity::{slug, EntityInfo};

/// Rounds a percentage to two decimals for display.
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// Member Sensor
// ============================================================================

/// One percentage sensor per member: the highest progress across the
/// member's classes, read from the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberProgressSensor {
    /// Entity identity.
    pub info: EntityInfo,
    value: f64,
}

impl MemberProgressSensor {
    /// The sensor value, rounded to two decimals.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Builds the per-member progress sensors from a snapshot.
pub fn build_member_sensors(
    account_id: &str,
    snapshot: &ProgressSnapshot,
) -> Vec<MemberProgressSensor> {
    snapshot
        .members
        .iter()
        .map(|(member_id, record)| MemberProgressSensor {
            info: EntityInfo::new(
                account_id,
                &format!("{member_id}_progress"),
                "Progress",
                *member_id,
                record.name.clone(),
            ),
            value: round_percent(record.progress),
        })
        .collect()
}

// ============================================================================
// Class Sensor
// ============================================================================

/// One percentage sensor per class, recomputing progress on demand from
/// the competency document so the value can never drift from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassProgressSensor {
    /// Entity identity.
    pub info: EntityInfo,
    member_id: MemberId,
    competencies: CompetencyDocument,
    sessions_completed: u32,
    total_sessions: u32,
    next_session: Option<DateTime<Utc>>,
}

impl ClassProgressSensor {
    /// The sensor value, recomputed from the competency document and
    /// rounded to two decimals. A class with no assessable competencies
    /// reads 0.0.
    pub fn value(&self) -> f64 {
        round_percent(self.competencies.progress_for(self.member_id))
    }

    /// The member this sensor belongs to.
    pub fn member_id(&self) -> MemberId {
        self.member_id
    }

    /// Sessions completed so far.
    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// Total sessions in the course.
    pub fn total_sessions(&self) -> u32 {
        self.total_sessions
    }

    /// Start of the next booked session, if any.
    pub fn next_session(&self) -> Option<DateTime<Utc>> {
        self.next_session
    }

    /// Extra attributes exposed alongside the value.
    pub fn extra_attributes(&self) -> Value {
        json!({
            "sessions_completed": self.sessions_completed,
            "total_sessions": self.total_sessions,
            "next_session": self.next_session,
        })
    }
}

/// Builds the per-class progress sensors from a snapshot.
pub fn build_class_sensors(
    account_id: &str,
    snapshot: &ProgressSnapshot,
) -> Vec<ClassProgressSensor> {
    let mut sensors = Vec::new();
    for (member_id, record) in &snapshot.members {
        for class in &record.classes {
            sensors.push(ClassProgressSensor {
                info: EntityInfo::new(
                    account_id,
                    &format!("{member_id}_{}_progress", slug(&class.class_name)),
                    class.class_name.clone(),
                    *member_id,
                    record.name.clone(),
                ),
                member_id: *member_id,
                competencies: class.competencies.clone(),
                sessions_completed: class.sessions_completed,
                total_sessions: class.total_sessions,
                next_session: class.next_session,
            });
        }
    }
    sensors
}

// ============================================================================
// Tests
// ============================================================================
