//! Competency documents and progress math.
//!
//! A competency document is the source of truth for a class's progress
//! percentage: a tree of skill nodes under a root container, plus a map of
//! completed node ids per member. Progress is always recomputed from the
//! document so the two can never diverge.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::member::MemberId;

/// Label of the placeholder nodes some backends insert into the tree.
/// They are never assessable and are excluded from leaf counts.
const SENTINEL_LABEL: &str = "/";

// ============================================================================
// Competency Node
// ============================================================================

/// One node of the skill tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyNode {
    /// Node identifier, referenced by the completion map.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Child nodes; empty for leaves.
    #[serde(default)]
    pub children: Vec<CompetencyNode>,
}

impl CompetencyNode {
    /// Creates a leaf node.
    pub fn leaf(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Creates a branch node with children.
    pub fn branch(
        id: impl Into<String>,
        label: impl Into<String>,
        children: Vec<CompetencyNode>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            children,
        }
    }
}

// ============================================================================
// Competency Document
// ============================================================================

/// Skill tree plus per-member completion map for one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetencyDocument {
    /// Root container node. The root itself is never a leaf, even when it
    /// has no children.
    pub root: CompetencyNode,
    /// Completed leaf ids, keyed by member id.
    #[serde(default)]
    pub completed: HashMap<MemberId, HashSet<String>>,
    /// Member name some backends embed in the document. Used as a display
    /// name fallback when the member record carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_name: Option<String>,
}

impl CompetencyDocument {
    /// Creates an empty document (root with no children).
    pub fn empty() -> Self {
        Self {
            root: CompetencyNode::branch("root", "root", Vec::new()),
            completed: HashMap::new(),
            member_name: None,
        }
    }

    /// Returns all countable leaves: childless descendants of the root,
    /// excluding the `/` sentinel nodes.
    pub fn leaves(&self) -> Vec<&CompetencyNode> {
        let mut out = Vec::new();
        for child in &self.root.children {
            collect_leaves(child, &mut out);
        }
        out
    }

    /// Number of countable leaves.
    pub fn total_leaves(&self) -> usize {
        self.leaves().len()
    }

    /// Number of leaves the given member has completed.
    ///
    /// Only ids that name an actual leaf count; stray ids in the completion
    /// map (interior nodes, removed skills) are ignored.
    pub fn completed_leaves(&self, member: MemberId) -> usize {
        let Some(done) = self.completed.get(&member) else {
            return 0;
        };
        self.leaves().iter().filter(|l| done.contains(&l.id)).count()
    }

    /// Progress percentage for the given member.
    ///
    /// Defined as completed leaves / total leaves * 100. A document with no
    /// countable leaves reads 0.0 rather than dividing by zero.
    pub fn progress_for(&self, member: MemberId) -> f64 {
        let total = self.total_leaves();
        if total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let pct = self.completed_leaves(member) as f64 / total as f64 * 100.0;
        pct
    }
}

fn collect_leaves<'a>(node: &'a CompetencyNode, out: &mut Vec<&'a CompetencyNode>) {
    if node.children.is_empty() {
        if node.label != SENTINEL_LABEL {
            out.push(node);
        }
        return;
    }
    for child in &node.children {
        collect_leaves(child, out);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_four_leaves() -> CompetencyDocument {
        let root = CompetencyNode::branch(
            "root",
            "Stage 3",
            vec![
                CompetencyNode::leaf("c1", "Front crawl 10m"),
                CompetencyNode::leaf("c2", "Back crawl 10m"),
                CompetencyNode::branch(
                    "grp",
                    "Water safety",
                    vec![
                        CompetencyNode::leaf("c3", "Tread water"),
                        CompetencyNode::leaf("c4", "Float on back"),
                    ],
                ),
            ],
        );
        CompetencyDocument {
            root,
            completed: HashMap::new(),
            member_name: None,
        }
    }

    #[test]
    fn test_leaf_count_skips_branches() {
        let doc = doc_with_four_leaves();
        assert_eq!(doc.total_leaves(), 4);
    }

    #[test]
    fn test_sentinel_nodes_are_not_leaves() {
        let mut doc = doc_with_four_leaves();
        doc.root.children.push(CompetencyNode::leaf("s", "/"));
        assert_eq!(doc.total_leaves(), 4);
    }

    #[test]
    fn test_childless_root_has_no_leaves() {
        let doc = CompetencyDocument::empty();
        assert_eq!(doc.total_leaves(), 0);
    }

    #[test]
    fn test_progress_one_of_four() {
        let mut doc = doc_with_four_leaves();
        doc.completed
            .insert(101, HashSet::from(["c1".to_string()]));
        assert!((doc.progress_for(101) - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_all_complete() {
        let mut doc = doc_with_four_leaves();
        doc.completed.insert(
            101,
            HashSet::from([
                "c1".to_string(),
                "c2".to_string(),
                "c3".to_string(),
                "c4".to_string(),
            ]),
        );
        assert!((doc.progress_for(101) - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_unknown_member_is_zero() {
        let doc = doc_with_four_leaves();
        assert!((doc.progress_for(999) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_progress_zero_leaves_is_zero() {
        let mut doc = CompetencyDocument::empty();
        doc.completed
            .insert(101, HashSet::from(["ghost".to_string()]));
        assert!((doc.progress_for(101) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stray_completed_ids_are_ignored() {
        let mut doc = doc_with_four_leaves();
        // "grp" is an interior node, "zz" does not exist
        doc.completed.insert(
            101,
            HashSet::from(["grp".to_string(), "zz".to_string(), "c2".to_string()]),
        );
        assert_eq!(doc.completed_leaves(101), 1);
    }

    #[test]
    fn test_document_serde_roundtrip() {
        let mut doc = doc_with_four_leaves();
        doc.completed
            .insert(101, HashSet::from(["c1".to_string()]));
        let json = serde_json::to_string(&doc).unwrap();
        let parsed: CompetencyDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, doc);
    }
}
