//! Label resolution

use crate::document::{FieldDocument, FieldNode};

/// Human-readable label of a field, or an empty string.
///
/// A label pointing at the field's `id` wins; otherwise the nearest
/// enclosing label is used.
pub fn resolve_label<D: FieldDocument + ?Sized>(doc: &D, field: &FieldNode) -> String {
    field
        .id
        .as_deref()
        .filter(|id| !id.is_empty())
        .and_then(|id| doc.label_text_for(id))
        .or_else(|| doc.enclosing_label_text(field.node))
        .unwrap_or_default()
}
