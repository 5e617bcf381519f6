//! Login form assembly
//!
//! Pairs every password field with the closest username field before it,
//! staying inside the password field's form when it has one.

use crate::document::{FieldDocument, FieldNode, FormRef};
use crate::username::is_username_field;
use crate::vocabulary::Vocabulary;
use serde::{Deserialize, Serialize};

/// A password field with its matched username field and form metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginFormRecord {
    pub password_field: FieldNode,
    pub username_field: Option<FieldNode>,
    pub form: Option<FormRef>,
    pub form_action: Option<String>,
    pub form_method: Option<String>,
}

/// Closest username field preceding `password` among `fields`.
///
/// When `password` sits in a form only fields of that same form qualify.
pub fn find_username_for_password<D: FieldDocument + ?Sized>(
    doc: &D,
    password: &FieldNode,
    fields: &[FieldNode],
    vocab: &Vocabulary,
) -> Option<FieldNode> {
    // Order and form checks are cheap; label lookups are not
    fields
        .iter()
        .filter(|f| in_scope(password, f))
        .filter(|f| is_username_field(doc, f, Some(password), vocab))
        .max_by_key(|f| f.document_order_index)
        .cloned()
}

/// Closest field of `usernames` preceding `password` in its form.
///
/// `usernames` must already have passed the username classifier without
/// password context; only the order and form checks are applied here.
pub fn closest_username(password: &FieldNode, usernames: &[FieldNode]) -> Option<FieldNode> {
    usernames
        .iter()
        .filter(|f| in_scope(password, f))
        .max_by_key(|f| f.document_order_index)
        .cloned()
}

/// Precedes `password` and shares its form, if it has one
fn in_scope(password: &FieldNode, candidate: &FieldNode) -> bool {
    candidate.precedes(password) && (password.form.is_none() || candidate.form == password.form)
}

/// Build the record for one password field from pre-classified `usernames`
pub fn assemble_login_form<D: FieldDocument + ?Sized>(
    doc: &D,
    password: &FieldNode,
    usernames: &[FieldNode],
) -> LoginFormRecord {
    let username_field = closest_username(password, usernames);
    let attrs = password.form.and_then(|form| doc.form_attributes(form));
    let (form_action, form_method) = match attrs {
        Some(attrs) => (attrs.action, attrs.method),
        None => (None, None),
    };

    LoginFormRecord {
        password_field: password.clone(),
        username_field,
        form: password.form,
        form_action,
        form_method,
    }
}
