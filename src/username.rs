//! Username field classification
//!
//! Heuristics for telling identifier inputs (user name, login, e-mail)
//! apart from every other text box on a page.

use crate::document::{FieldDocument, FieldNode};
use crate::label::resolve_label;
use crate::normalize::{alphanumeric_strip, words};
use crate::vocabulary::Vocabulary;
use tracing::debug;

/// Input types that can never hold a username
const EXCLUDED_KINDS: &[&str] = &[
    "hidden", "submit", "reset", "button", "image", "file", "radio", "checkbox",
];

/// Input types that can hold a username
const USERNAME_KINDS: &[&str] = &["text", "email", "tel"];

/// Whether `field` is a username field.
///
/// With `password` given, the field must also come before it in document
/// order. `vocab` must be [`Vocabulary::prepared`].
pub fn is_username_field<D: FieldDocument + ?Sized>(
    doc: &D,
    field: &FieldNode,
    password: Option<&FieldNode>,
    vocab: &Vocabulary,
) -> bool {
    let kind = field.kind.as_str();
    if field.disabled || EXCLUDED_KINDS.contains(&kind) || !USERNAME_KINDS.contains(&kind) {
        return false;
    }

    if is_search_field(field, &vocab.search_terms) {
        debug!("Field {} rejected as username: search field", field.node);
        return false;
    }

    if let Some(password) = password {
        if !field.precedes(password) {
            return false;
        }
    }

    matches_username_pattern(doc, field, &vocab.username_names)
}

/// A site-search box, judged by the words in its type, name, id and placeholder
pub fn is_search_field(field: &FieldNode, search_terms: &[String]) -> bool {
    [
        Some(field.kind.as_str()),
        field.name.as_deref(),
        field.id.as_deref(),
        field.placeholder.as_deref(),
    ]
    .into_iter()
    .flatten()
    .flat_map(words)
    .any(|word| search_terms.contains(&word))
}

/// Any of id, name, placeholder, label or aria-label names an identifier
fn matches_username_pattern<D: FieldDocument + ?Sized>(
    doc: &D,
    field: &FieldNode,
    username_names: &[String],
) -> bool {
    let label = resolve_label(doc, field);
    let candidates = [
        field.id.as_deref(),
        field.name.as_deref(),
        field.placeholder.as_deref(),
        Some(label.as_str()),
        field.aria_label.as_deref(),
    ];

    for value in candidates.into_iter().flatten() {
        let normalized = alphanumeric_strip(value);
        if normalized.is_empty() {
            continue;
        }
        if let Some(term) = username_names
            .iter()
            .find(|term| normalized.contains(term.as_str()))
        {
            debug!(
                "Field {} matches username pattern: '{}' contains '{}'",
                field.node, value, term
            );
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FieldAttributes;
    use crate::snapshot::DocumentSnapshot;

    fn vocab() -> Vocabulary {
        Vocabulary::default().prepared()
    }

    fn field(kind: &str, id: Option<&str>, name: Option<&str>, index: usize) -> FieldNode {
        FieldNode::from_attributes(
            index,
            FieldAttributes {
                kind: kind.into(),
                id: id.map(Into::into),
                name: name.map(Into::into),
                ..Default::default()
            },
            index,
            None,
        )
    }

    #[test]
    fn test_email_field_before_password() {
        let doc = DocumentSnapshot::default();
        let email = field("text", None, Some("email"), 3);
        let password = field("password", None, None, 5);
        assert!(is_username_field(&doc, &email, Some(&password), &vocab()));
        assert!(is_username_field(&doc, &email, None, &vocab()));
    }

    #[test]
    fn test_field_after_password_is_rejected() {
        let doc = DocumentSnapshot::default();
        let email = field("email", None, Some("email"), 6);
        let password = field("password", None, None, 5);
        assert!(!is_username_field(&doc, &email, Some(&password), &vocab()));
    }

    #[test]
    fn test_search_field_is_rejected() {
        let doc = DocumentSnapshot::default();
        let search = field("text", Some("search-query"), Some("username"), 1);
        assert!(!is_username_field(&doc, &search, None, &vocab()));
        let camel = field("text", Some("userSearch"), None, 1);
        assert!(!is_username_field(&doc, &camel, None, &vocab()));
        let typed = field("search", None, Some("login"), 1);
        assert!(!is_username_field(&doc, &typed, None, &vocab()));
    }

    #[test]
    fn test_search_words_must_be_whole() {
        // "going", "researcher" and "Goß" are not search words
        assert!(!is_search_field(&field("text", Some("going"), None, 0), &vocab().search_terms));
        assert!(!is_search_field(&field("text", Some("Goß"), None, 0), &vocab().search_terms));
        assert!(is_search_field(&field("text", Some("siteSearch"), None, 0), &vocab().search_terms));
        assert!(!is_search_field(&field("text", Some("researcher"), None, 0), &vocab().search_terms));
    }

    #[test]
    fn test_excluded_and_unsupported_kinds() {
        let doc = DocumentSnapshot::default();
        for kind in ["hidden", "checkbox", "password", "textarea", "number"] {
            let f = field(kind, None, Some("username"), 0);
            assert!(!is_username_field(&doc, &f, None, &vocab()), "kind {kind}");
        }
        for kind in ["text", "email", "tel"] {
            let f = field(kind, None, Some("username"), 0);
            assert!(is_username_field(&doc, &f, None, &vocab()), "kind {kind}");
        }
    }

    #[test]
    fn test_disabled_is_rejected() {
        let doc = DocumentSnapshot::default();
        let mut f = field("text", None, Some("username"), 0);
        f.disabled = true;
        assert!(!is_username_field(&doc, &f, None, &vocab()));
    }

    #[test]
    fn test_german_and_label_matching() {
        let doc = DocumentSnapshot::from_json(
            r#"{"nodes": [
                {"tag": "label", "for": "f1", "text": "Benutzer-Name"},
                {"tag": "input", "id": "f1"},
                {"tag": "input", "id": "f2", "aria_label": "E-Mail-Adresse"},
                {"tag": "input", "id": "f3", "placeholder": "Vorname"}
            ]}"#,
        )
        .unwrap();
        let fields = FieldNode::collect(&doc);
        assert!(is_username_field(&doc, &fields[0], None, &vocab()));
        assert!(is_username_field(&doc, &fields[1], None, &vocab()));
        assert!(!is_username_field(&doc, &fields[2], None, &vocab()));
    }
}
