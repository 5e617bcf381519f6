//! In-memory document snapshot
//!
//! A flat, JSON-friendly element list. Array order is document order
//! (pre-order) and each node points at its parent by index, so every
//! element's descendants directly follow it.

use crate::document::{FieldAttributes, FieldDocument, FormAttributes, FormRef, NodeId};
use crate::error::{DetectorError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Input types a browser recognizes; anything else behaves as "text"
const INPUT_TYPES: &[&str] = &[
    "button",
    "checkbox",
    "color",
    "date",
    "datetime-local",
    "email",
    "file",
    "hidden",
    "image",
    "month",
    "number",
    "password",
    "radio",
    "range",
    "reset",
    "search",
    "submit",
    "tel",
    "text",
    "time",
    "url",
    "week",
];

/// One element of a snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotNode {
    /// Element tag, e.g. "input", "label", "form"
    pub tag: String,
    /// `type` attribute of inputs
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_label: Option<String>,
    pub disabled: bool,
    /// Index of the parent node
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<usize>,
    /// Text directly inside this element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// `for` attribute of labels
    #[serde(rename = "for", skip_serializing_if = "Option::is_none")]
    pub html_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

impl SnapshotNode {
    fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// Effective input kind, as a browser would report `element.type`
    fn kind(&self) -> String {
        if self.is_tag("textarea") {
            return "textarea".to_string();
        }
        let declared = self
            .input_type
            .as_deref()
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_default();
        if INPUT_TYPES.contains(&declared.as_str()) {
            declared
        } else {
            "text".to_string()
        }
    }
}

/// A whole document as a flat element list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub nodes: Vec<SnapshotNode>,
}

impl DocumentSnapshot {
    /// Build a snapshot and check its parent links
    pub fn new(nodes: Vec<SnapshotNode>) -> Result<Self> {
        let snapshot = Self { nodes };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Parse a snapshot from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self =
            serde_json::from_str(json).map_err(|e| DetectorError::SnapshotError(e.to_string()))?;
        snapshot.validate()?;
        debug!("Loaded snapshot with {} nodes", snapshot.nodes.len());
        Ok(snapshot)
    }

    /// Read and parse a snapshot file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parents must come earlier in document order, which also rules out
    /// cycles, and must still be open: a node cannot return to a subtree
    /// that an earlier sibling branch already closed.
    pub fn validate(&self) -> Result<()> {
        let mut open: Vec<NodeId> = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            match node.parent {
                Some(parent) if parent >= index => {
                    return Err(DetectorError::InvalidSnapshot(format!(
                        "node {} has parent {} which does not precede it",
                        index, parent
                    )));
                }
                Some(parent) => {
                    while open.last().is_some_and(|&top| top != parent) {
                        open.pop();
                    }
                    if open.is_empty() {
                        return Err(DetectorError::InvalidSnapshot(format!(
                            "node {} reopens closed parent {}",
                            index, parent
                        )));
                    }
                }
                None => open.clear(),
            }
            open.push(index);
        }
        Ok(())
    }

    /// Parent of `node`; links that do not point backwards are ignored
    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?.parent.filter(|&p| p < node)
    }

    /// Ancestors of `node`, nearest first
    fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent_of(node), move |&p| self.parent_of(p))
    }

    fn nearest_ancestor(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        self.ancestors(node).find(|&a| self.nodes[a].is_tag(tag))
    }

    fn is_descendant_of(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(node).any(|a| a == ancestor)
    }

    /// Own text followed by every descendant's text, in document order.
    ///
    /// Descendants form the contiguous run right after `node`.
    fn text_content(&self, node: NodeId) -> String {
        let subtree = self
            .nodes
            .iter()
            .enumerate()
            .skip(node)
            .take_while(|&(index, _)| index == node || self.is_descendant_of(index, node));

        let mut text = String::new();
        for (_, n) in subtree {
            if let Some(t) = &n.text {
                text.push_str(t);
            }
        }
        text
    }
}

impl FieldDocument for DocumentSnapshot {
    fn all_nodes(&self) -> Vec<NodeId> {
        (0..self.nodes.len()).collect()
    }

    fn input_nodes(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_tag("input") || n.is_tag("textarea"))
            .map(|(index, _)| index)
            .collect()
    }

    fn field_attributes(&self, node: NodeId) -> Option<FieldAttributes> {
        let n = self.nodes.get(node)?;
        Some(FieldAttributes {
            kind: n.kind(),
            id: n.id.clone(),
            name: n.name.clone(),
            placeholder: n.placeholder.clone(),
            aria_label: n.aria_label.clone(),
            disabled: n.disabled,
        })
    }

    fn label_text_for(&self, id: &str) -> Option<String> {
        self.nodes
            .iter()
            .position(|n| n.is_tag("label") && n.html_for.as_deref() == Some(id))
            .map(|label| self.text_content(label))
    }

    fn enclosing_label_text(&self, node: NodeId) -> Option<String> {
        self.nearest_ancestor(node, "label")
            .map(|label| self.text_content(label))
    }

    fn enclosing_form(&self, node: NodeId) -> Option<FormRef> {
        self.nearest_ancestor(node, "form").map(FormRef)
    }

    fn form_attributes(&self, form: FormRef) -> Option<FormAttributes> {
        let n = self.nodes.get(form.0).filter(|n| n.is_tag("form"))?;
        Some(FormAttributes {
            action: n.action.clone(),
            method: n.method.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"{
        "nodes": [
            {"tag": "body"},
            {"tag": "form", "parent": 0, "action": "/login", "method": "post"},
            {"tag": "label", "parent": 1, "for": "user", "text": "E-Mail "},
            {"tag": "span", "parent": 2, "text": "Adresse"},
            {"tag": "input", "parent": 1, "id": "user", "type": "EMAIL"},
            {"tag": "label", "parent": 1, "text": "Secret"},
            {"tag": "input", "parent": 5, "type": "password"},
            {"tag": "textarea", "parent": 0, "name": "notes"}
        ]
    }"#;

    #[test]
    fn test_input_nodes_and_kinds() {
        let doc = DocumentSnapshot::from_json(LOGIN_PAGE).unwrap();
        assert_eq!(doc.input_nodes(), vec![4, 6, 7]);
        assert_eq!(doc.field_attributes(4).unwrap().kind, "email");
        assert_eq!(doc.field_attributes(6).unwrap().kind, "password");
        assert_eq!(doc.field_attributes(7).unwrap().kind, "textarea");
    }

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        let node = SnapshotNode {
            tag: "input".into(),
            input_type: Some("fancy".into()),
            ..Default::default()
        };
        assert_eq!(node.kind(), "text");
        let bare = SnapshotNode {
            tag: "INPUT".into(),
            ..Default::default()
        };
        assert_eq!(bare.kind(), "text");
    }

    #[test]
    fn test_labels() {
        let doc = DocumentSnapshot::from_json(LOGIN_PAGE).unwrap();
        assert_eq!(doc.label_text_for("user").as_deref(), Some("E-Mail Adresse"));
        assert_eq!(doc.label_text_for("missing"), None);
        assert_eq!(doc.enclosing_label_text(6).as_deref(), Some("Secret"));
        assert_eq!(doc.enclosing_label_text(4), None);
    }

    #[test]
    fn test_forms() {
        let doc = DocumentSnapshot::from_json(LOGIN_PAGE).unwrap();
        assert_eq!(doc.enclosing_form(6), Some(FormRef(1)));
        assert_eq!(doc.enclosing_form(7), None);
        let attrs = doc.form_attributes(FormRef(1)).unwrap();
        assert_eq!(attrs.action.as_deref(), Some("/login"));
        assert_eq!(attrs.method.as_deref(), Some("post"));
        assert!(doc.form_attributes(FormRef(0)).is_none());
    }

    #[test]
    fn test_rejects_forward_parent() {
        let err = DocumentSnapshot::from_json(r#"{"nodes": [{"tag": "div", "parent": 0}]}"#)
            .unwrap_err();
        assert!(matches!(err, DetectorError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_rejects_reopened_parent() {
        // Node 3 claims the first div after the second div closed it
        let err = DocumentSnapshot::from_json(
            r#"{"nodes": [
                {"tag": "body"},
                {"tag": "div", "parent": 0},
                {"tag": "div", "parent": 0},
                {"tag": "span", "parent": 1}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, DetectorError::InvalidSnapshot(_)));
    }

    #[test]
    fn test_new_validates_nodes() {
        let node = |tag: &str, parent: Option<usize>| SnapshotNode {
            tag: tag.into(),
            parent,
            ..Default::default()
        };
        let doc = DocumentSnapshot::new(vec![node("form", None), node("input", Some(0))]).unwrap();
        assert_eq!(doc.enclosing_form(1), Some(FormRef(0)));

        let err = DocumentSnapshot::new(vec![node("input", Some(3))]).unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_text_content_stops_at_subtree_end() {
        let doc = DocumentSnapshot::from_json(
            r#"{"nodes": [
                {"tag": "label", "text": "User"},
                {"tag": "b", "parent": 0, "text": "name"},
                {"tag": "p", "text": " outside"},
                {"tag": "i", "parent": 2, "text": " nested"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(doc.text_content(0), "Username");
        assert_eq!(doc.text_content(2), " outside nested");
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = DocumentSnapshot::from_json("{nodes:").unwrap_err();
        assert!(matches!(err, DetectorError::SnapshotError(_)));
    }
}
