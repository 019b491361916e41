//! Common entity identity and device grouping.

use classwatch_core::MemberId;
use serde::Serialize;

/// Domain prefix used in device identifiers.
const DOMAIN: &str = "classwatch";

/// Device grouping: every entity belongs to the device of its member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Identifier pair, `(domain, member id)`.
    pub identifiers: (String, MemberId),
    /// Device display name, the member's resolved name.
    pub name: String,
}

/// Identity shared by all entity kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityInfo {
    /// Unique id, `{account id}_{key}`.
    pub unique_id: String,
    /// Entity display name.
    pub name: String,
    /// Device this entity is grouped under.
    pub device: DeviceInfo,
}

impl EntityInfo {
    /// Builds entity identity for one member-scoped entity.
    pub fn new(
        account_id: &str,
        key: &str,
        name: impl Into<String>,
        member_id: MemberId,
        member_name: impl Into<String>,
    ) -> Self {
        Self {
            unique_id: format!("{account_id}_{key}"),
            name: name.into(),
            device: DeviceInfo {
                identifiers: (DOMAIN.to_string(), member_id),
                name: member_name.into(),
            },
        }
    }
}

/// Lowercases a display name into a stable id fragment.
pub(crate) fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
