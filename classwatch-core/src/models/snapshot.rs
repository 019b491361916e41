//! The normalized per-account snapshot.
//!
//! The coordinator rebuilds this wholesale on every refresh: a flat mapping
//! from member id to a record of name, best progress, and per-class data.
//! There is no incremental diffing. The refresh timestamp deliberately
//! lives next to the snapshot, not inside it, so two refreshes over
//! unchanged backend data compare equal.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::class::Class;
use super::competency::CompetencyDocument;
use super::member::{Member, MemberId};

// ============================================================================
// Records
// ============================================================================

/// Normalized per-class view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Display name of the class.
    pub class_name: String,
    /// Sessions completed so far.
    pub sessions_completed: u32,
    /// Total sessions in the course.
    pub total_sessions: u32,
    /// Start of the next scheduled session, if booked.
    pub next_session: Option<DateTime<Utc>>,
    /// Progress percentage, recomputed from `competencies` at build time.
    pub progress: f64,
    /// The competency document the progress was computed from.
    pub competencies: CompetencyDocument,
}

impl ClassRecord {
    fn from_class(class: &Class, member: MemberId) -> Self {
        Self {
            class_name: class.class_name.clone(),
            sessions_completed: class.sessions_attended,
            total_sessions: class.total_sessions,
            next_session: class.next_session,
            progress: class.progress_for(member),
            competencies: class.competencies.clone(),
        }
    }
}

/// Normalized per-member view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberRecord {
    /// Resolved display name.
    pub name: String,
    /// Highest progress percentage across the member's classes.
    pub progress: f64,
    /// Per-class records, in backend discovery order.
    pub classes: Vec<ClassRecord>,
}

// ============================================================================
// Snapshot
// ============================================================================

/// Flat mapping from member id to normalized record for one account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Member records keyed by member id.
    pub members: BTreeMap<MemberId, MemberRecord>,
}

impl ProgressSnapshot {
    /// Creates an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the snapshot from a fetched member graph.
    pub fn from_members(members: &[Member]) -> Self {
        let mut out = BTreeMap::new();
        for member in members {
            let classes: Vec<ClassRecord> = member
                .classes
                .iter()
                .map(|c| ClassRecord::from_class(c, member.member_id))
                .collect();
            let progress = classes.iter().map(|c| c.progress).fold(0.0, f64::max);
            out.insert(
                member.member_id,
                MemberRecord {
                    name: member.display_name(),
                    progress,
                    classes,
                },
            );
        }
        Self { members: out }
    }

    /// Returns the record for one member.
    pub fn member(&self, id: MemberId) -> Option<&MemberRecord> {
        self.members.get(&id)
    }

    /// Returns true if no members are present.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of members in the snapshot.
    pub fn len(&self) -> usize {
        self.members.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::competency::{CompetencyDocument, CompetencyNode};
    use std::collections::{HashMap, HashSet};

    fn doc(completed_of_two: usize, member: MemberId) -> CompetencyDocument {
        let root = CompetencyNode::branch(
            "root",
            "root",
            vec![
                CompetencyNode::leaf("a", "A"),
                CompetencyNode::leaf("b", "B"),
            ],
        );
        let mut done = HashSet::new();
        if completed_of_two >= 1 {
            done.insert("a".to_string());
        }
        if completed_of_two >= 2 {
            done.insert("b".to_string());
        }
        CompetencyDocument {
            root,
            completed: HashMap::from([(member, done)]),
            member_name: None,
        }
    }

    fn class(id: u32, name: &str, competencies: CompetencyDocument) -> Class {
        Class {
            class_id: id,
            class_name: name.to_string(),
            sessions_attended: 3,
            total_sessions: 10,
            next_session: None,
            sessions: Vec::new(),
            competencies,
        }
    }

    #[test]
    fn test_member_progress_is_highest_across_classes() {
        let member = Member {
            member_id: 101,
            first_name: Some("Alice".to_string()),
            classes: vec![
                class(1, "Stage 1", doc(1, 101)),
                class(2, "Stage 2", doc(2, 101)),
            ],
        };
        let snapshot = ProgressSnapshot::from_members(&[member]);
        let record = snapshot.member(101).unwrap();
        assert!((record.progress - 100.0).abs() < f64::EPSILON);
        assert_eq!(record.classes.len(), 2);
        assert!((record.classes[0].progress - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_member_with_no_classes_has_zero_progress() {
        let member = Member {
            member_id: 7,
            first_name: None,
            classes: Vec::new(),
        };
        let snapshot = ProgressSnapshot::from_members(&[member]);
        let record = snapshot.member(7).unwrap();
        assert!((record.progress - 0.0).abs() < f64::EPSILON);
        assert_eq!(record.name, "Member 7");
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let members = vec![Member {
            member_id: 101,
            first_name: Some("Alice".to_string()),
            classes: vec![class(1, "Stage 1", doc(1, 101))],
        }];
        let first = ProgressSnapshot::from_members(&members);
        let second = ProgressSnapshot::from_members(&members);
        assert_eq!(first, second);
    }
}
