//! Field Detector
//!
//! Public entry points. Every call walks the document again, so results
//! always reflect the tree as it is now.

use crate::document::{FieldDocument, FieldNode};
use crate::forms::{self, LoginFormRecord};
use crate::vocabulary::Vocabulary;
use crate::{password, username};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::info;

static DEFAULT_DETECTOR: LazyLock<FieldDetector> = LazyLock::new(FieldDetector::default);

/// What a single field is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldRole {
    Password,
    Username,
    Other,
}

/// Classifier bound to one vocabulary
#[derive(Debug, Clone)]
pub struct FieldDetector {
    vocabulary: Vocabulary,
}

impl FieldDetector {
    /// Create a detector; the vocabulary is normalized once here
    pub fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            vocabulary: vocabulary.prepared(),
        }
    }

    /// The normalized vocabulary in use
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn is_password_field(&self, field: &FieldNode) -> bool {
        password::is_password_field(field, &self.vocabulary.password_excludes)
    }

    pub fn is_username_field<D: FieldDocument + ?Sized>(
        &self,
        doc: &D,
        field: &FieldNode,
        password: Option<&FieldNode>,
    ) -> bool {
        username::is_username_field(doc, field, password, &self.vocabulary)
    }

    /// Password fields in document order
    pub fn detect_password_fields<D: FieldDocument + ?Sized>(&self, doc: &D) -> Vec<FieldNode> {
        let passwords: Vec<FieldNode> = FieldNode::collect(doc)
            .into_iter()
            .filter(|f| self.is_password_field(f))
            .collect();
        info!("Detected {} password fields", passwords.len());
        passwords
    }

    /// Username fields in document order, optionally only those before `password`
    pub fn detect_username_fields<D: FieldDocument + ?Sized>(
        &self,
        doc: &D,
        password: Option<&FieldNode>,
    ) -> Vec<FieldNode> {
        let usernames: Vec<FieldNode> = FieldNode::collect(doc)
            .into_iter()
            .filter(|f| self.is_username_field(doc, f, password))
            .collect();
        info!("Detected {} username fields", usernames.len());
        usernames
    }

    /// Closest username field before `password`, within its form if it has one
    pub fn find_username_for_password<D: FieldDocument + ?Sized>(
        &self,
        password: &FieldNode,
        doc: &D,
    ) -> Option<FieldNode> {
        let fields = FieldNode::collect(doc);
        forms::find_username_for_password(doc, password, &fields, &self.vocabulary)
    }

    /// One record per password field, in document order
    pub fn get_login_forms<D: FieldDocument + ?Sized>(&self, doc: &D) -> Vec<LoginFormRecord> {
        let fields = FieldNode::collect(doc);
        // Only the order check depends on the password, so classify once
        let usernames: Vec<FieldNode> = fields
            .iter()
            .filter(|f| self.is_username_field(doc, f, None))
            .cloned()
            .collect();
        let records: Vec<LoginFormRecord> = fields
            .iter()
            .filter(|f| self.is_password_field(f))
            .map(|password| forms::assemble_login_form(doc, password, &usernames))
            .collect();

        info!(
            "Login form detection complete - {} forms, {} with username",
            records.len(),
            records.iter().filter(|r| r.username_field.is_some()).count()
        );
        records
    }

    /// Role of a single field, password taking precedence
    pub fn classify_field<D: FieldDocument + ?Sized>(&self, doc: &D, field: &FieldNode) -> FieldRole {
        if self.is_password_field(field) {
            FieldRole::Password
        } else if self.is_username_field(doc, field, None) {
            FieldRole::Username
        } else {
            FieldRole::Other
        }
    }
}

impl Default for FieldDetector {
    fn default() -> Self {
        Self::new(&Vocabulary::default())
    }
}

/// [`FieldDetector::detect_password_fields`] with the built-in vocabulary
pub fn detect_password_fields<D: FieldDocument + ?Sized>(doc: &D) -> Vec<FieldNode> {
    DEFAULT_DETECTOR.detect_password_fields(doc)
}

/// [`FieldDetector::detect_username_fields`] with the built-in vocabulary
pub fn detect_username_fields<D: FieldDocument + ?Sized>(
    doc: &D,
    password: Option<&FieldNode>,
) -> Vec<FieldNode> {
    DEFAULT_DETECTOR.detect_username_fields(doc, password)
}

/// [`FieldDetector::is_password_field`] with the built-in vocabulary
pub fn is_password_field(field: &FieldNode) -> bool {
    DEFAULT_DETECTOR.is_password_field(field)
}

/// [`FieldDetector::is_username_field`] with the built-in vocabulary
pub fn is_username_field<D: FieldDocument + ?Sized>(
    doc: &D,
    field: &FieldNode,
    password: Option<&FieldNode>,
) -> bool {
    DEFAULT_DETECTOR.is_username_field(doc, field, password)
}

/// [`FieldDetector::find_username_for_password`] with the built-in vocabulary
pub fn find_username_for_password<D: FieldDocument + ?Sized>(
    password: &FieldNode,
    doc: &D,
) -> Option<FieldNode> {
    DEFAULT_DETECTOR.find_username_for_password(password, doc)
}

/// [`FieldDetector::get_login_forms`] with the built-in vocabulary
pub fn get_login_forms<D: FieldDocument + ?Sized>(doc: &D) -> Vec<LoginFormRecord> {
    DEFAULT_DETECTOR.get_login_forms(doc)
}
