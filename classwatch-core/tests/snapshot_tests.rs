//! Integration tests for core snapshot types.

use classwatch_core::{Member, ProgressSnapshot};

#[test]
fn test_snapshot_serialization_roundtrip() {
    let members = vec![Member {
        member_id: 5,
        first_name: Some("Bea".to_string()),
        classes: Vec::new(),
    }];
    let snapshot = ProgressSnapshot::from_members(&members);
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: ProgressSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, snapshot);
}

#[test]
fn test_empty_snapshot() {
    let snapshot = ProgressSnapshot::new();
    assert!(snapshot.is_empty());
    assert_eq!(snapshot.len(), 0);
    assert!(snapshot.member(1).is_none());
}
