//! Classes (courses) with attendance and competency tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::competency::CompetencyDocument;
use super::member::MemberId;
use super::session::Session;

/// A course or activity a member is enrolled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Backend class identifier.
    pub class_id: u32,
    /// Display name of the class.
    pub class_name: String,
    /// Sessions the member has attended so far.
    pub sessions_attended: u32,
    /// Total sessions in the course.
    pub total_sessions: u32,
    /// Start of the next scheduled session, if one is booked.
    pub next_session: Option<DateTime<Utc>>,
    /// All known sessions of this class.
    pub sessions: Vec<Session>,
    /// Competency document; the source of truth for progress.
    pub competencies: CompetencyDocument,
}

impl Class {
    /// Progress percentage for the given member, recomputed from the
    /// competency document.
    pub fn progress_for(&self, member: MemberId) -> f64 {
        self.competencies.progress_for(member)
    }
}
