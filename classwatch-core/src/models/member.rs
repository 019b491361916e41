//! Members and display-name resolution.

use serde::{Deserialize, Serialize};

use super::class::Class;

/// Backend identifier of a member. Unique within one account.
pub type MemberId = u32;

/// An account holder tracked by the backend, e.g. a household member
/// enrolled in classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Backend member identifier.
    pub member_id: MemberId,
    /// First name as reported by the member record, when present.
    pub first_name: Option<String>,
    /// Classes this member is enrolled in.
    pub classes: Vec<Class>,
}

impl Member {
    /// Resolves the display name for this member.
    ///
    /// This is the single resolution site; priority order:
    ///
    /// 1. a non-empty `first_name` on the member record
    /// 2. a `member_name` embedded in one of the member's competency
    ///    documents (first class carrying one wins)
    /// 3. `"Member {id}"`
    pub fn display_name(&self) -> String {
        if let Some(name) = &self.first_name {
            if !name.trim().is_empty() {
                return name.trim().to_string();
            }
        }

        for class in &self.classes {
            if let Some(name) = &class.competencies.member_name {
                if !name.trim().is_empty() {
                    return name.trim().to_string();
                }
            }
        }

        format!("Member {}", self.member_id)
    }
}
