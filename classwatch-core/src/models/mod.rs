//! Domain models for Classwatch.
//!
//! This module contains the data structures representing the member/class
//! graph fetched from a course-progress instance and the normalized
//! snapshot the coordinator republishes to entities.
//!
//! ## Submodules
//!
//! - [`member`] - Members and display-name resolution
//! - [`class`] - Classes (courses) with attendance and competencies
//! - [`session`] - Sessions and wire timestamp handling
//! - [`competency`] - Competency documents and progress math
//! - [`snapshot`] - The normalized per-account snapshot

mod class;
mod competency;
mod member;
mod session;
mod snapshot;

// Re-export everything at the models level
pub use class::Class;
pub use competency::{CompetencyDocument, CompetencyNode};
pub use member::{Member, MemberId};
pub use session::{parse_wire_timestamp, Session, WIRE_TIMESTAMP_FORMAT};
pub use snapshot::{ClassRecord, MemberRecord, ProgressSnapshot};
