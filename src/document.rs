//! Document abstraction
//!
//! The classifiers never see a concrete DOM. Anything that can answer the
//! queries in [`FieldDocument`] can be scanned: a browser bridge, a parsed
//! HTML tree, or the JSON [`crate::snapshot::DocumentSnapshot`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque handle to one element of a document
pub type NodeId = usize;

/// Identity of a form element. Only compared, never dereferenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormRef(pub NodeId);

/// Raw per-element attributes a document exposes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldAttributes {
    /// Input type, e.g. "password", "email", "textarea"
    pub kind: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub disabled: bool,
}

/// Submission attributes of a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormAttributes {
    pub action: Option<String>,
    pub method: Option<String>,
}

/// Read-only queries the detector needs from a document tree
pub trait FieldDocument {
    /// Every element, in document order
    fn all_nodes(&self) -> Vec<NodeId>;

    /// Input and textarea elements, in document order
    fn input_nodes(&self) -> Vec<NodeId>;

    /// Attributes of an element, `None` if the node is unknown
    fn field_attributes(&self, node: NodeId) -> Option<FieldAttributes>;

    /// Text content of the first label associated with `id` via its `for` attribute
    fn label_text_for(&self, id: &str) -> Option<String>;

    /// Text content of the nearest enclosing label element
    fn enclosing_label_text(&self, node: NodeId) -> Option<String>;

    /// Nearest enclosing form element
    fn enclosing_form(&self, node: NodeId) -> Option<FormRef>;

    /// Action and method of a form
    fn form_attributes(&self, form: FormRef) -> Option<FormAttributes>;
}

/// Transient view of one input-like element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNode {
    /// Handle into the document this view was built from
    pub node: NodeId,
    pub kind: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub placeholder: Option<String>,
    pub aria_label: Option<String>,
    pub disabled: bool,
    /// Position among all elements of the document, not just inputs
    pub document_order_index: usize,
    pub form: Option<FormRef>,
}

impl FieldNode {
    /// Build fresh views of every input element in `doc`.
    ///
    /// Nothing is cached: call again after the document changes.
    pub fn collect<D: FieldDocument + ?Sized>(doc: &D) -> Vec<FieldNode> {
        let order: HashMap<NodeId, usize> = doc
            .all_nodes()
            .into_iter()
            .enumerate()
            .map(|(index, node)| (node, index))
            .collect();

        doc.input_nodes()
            .into_iter()
            .filter_map(|node| {
                let index = *order.get(&node)?;
                let attrs = doc.field_attributes(node)?;
                Some(FieldNode::from_attributes(
                    node,
                    attrs,
                    index,
                    doc.enclosing_form(node),
                ))
            })
            .collect()
    }

    pub fn from_attributes(
        node: NodeId,
        attrs: FieldAttributes,
        document_order_index: usize,
        form: Option<FormRef>,
    ) -> Self {
        Self {
            node,
            kind: attrs.kind,
            id: attrs.id,
            name: attrs.name,
            placeholder: attrs.placeholder,
            aria_label: attrs.aria_label,
            disabled: attrs.disabled,
            document_order_index,
            form,
        }
    }

    /// Whether this field comes before `other` in document order
    pub fn precedes(&self, other: &FieldNode) -> bool {
        self.document_order_index < other.document_order_index
    }

    /// `id`, `name` and `placeholder`, skipping absent ones
    pub fn identifying_values(&self) -> impl Iterator<Item = &str> {
        [&self.id, &self.name, &self.placeholder]
            .into_iter()
            .filter_map(|v| v.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(index: usize) -> FieldNode {
        FieldNode::from_attributes(
            index,
            FieldAttributes {
                kind: "text".into(),
                name: Some("user".into()),
                ..Default::default()
            },
            index,
            None,
        )
    }

    #[test]
    fn test_precedes() {
        assert!(field(2).precedes(&field(5)));
        assert!(!field(5).precedes(&field(5)));
        assert!(!field(7).precedes(&field(5)));
    }

    #[test]
    fn test_identifying_values_skip_absent() {
        let f = field(0);
        let values: Vec<&str> = f.identifying_values().collect();
        assert_eq!(values, vec!["user"]);
    }
}
