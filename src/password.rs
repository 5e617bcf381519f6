//! Password field classification

use crate::document::FieldNode;
use crate::normalize::separator_strip;
use tracing::debug;

/// Whether `field` is a password input.
///
/// `excludes` must already be separator-stripped (see
/// [`crate::vocabulary::Vocabulary::prepared`]).
pub fn is_password_field(field: &FieldNode, excludes: &[String]) -> bool {
    if field.disabled {
        return false;
    }

    match field.kind.as_str() {
        "password" => !is_disqualified(field, excludes),
        "text" => looks_like_password(field) && !is_disqualified(field, excludes),
        _ => false,
    }
}

/// A text input whose id, name or placeholder mentions "password"
fn looks_like_password(field: &FieldNode) -> bool {
    field
        .identifying_values()
        .any(|value| separator_strip(value).contains("password"))
}

/// Hint, captcha and one-time-code inputs are not passwords
fn is_disqualified(field: &FieldNode, excludes: &[String]) -> bool {
    for value in field.identifying_values() {
        let normalized = separator_strip(value);
        if let Some(term) = excludes.iter().find(|t| normalized.contains(t.as_str())) {
            debug!(
                "Field {} disqualified as password: '{}' contains '{}'",
                field.node, value, term
            );
            return true;
        }
    }
    false
}
