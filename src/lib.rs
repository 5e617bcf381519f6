//! Autofill Field Detector
//!
//! Finds credential-entry fields in web form trees: password inputs and the
//! username/identifier inputs that belong to them. Works from element
//! attributes and labels only, so it needs no site-specific markup.
//!
//! ## Features
//! - Password detection with hint/captcha/one-time-code exclusion
//! - Username detection with English and German vocabulary
//! - Search boxes are never mistaken for usernames
//! - Pairs each password with the closest preceding username in its form
//!
//! ## Architecture
//! - `document` - the queries a document tree must answer
//! - `snapshot` - JSON document snapshot implementing those queries
//! - `password`, `username`, `label` - field classifiers
//! - `forms` - login form assembly
//! - `detector` - public entry points
//! - `vocabulary`, `config` - term lists and their override file

pub mod config;
pub mod detector;
pub mod document;
pub mod error;
pub mod forms;
pub mod label;
pub mod normalize;
pub mod password;
pub mod snapshot;
pub mod username;
pub mod vocabulary;

pub use detector::{
    detect_password_fields, detect_username_fields, find_username_for_password,
    get_login_forms, is_password_field, is_username_field, FieldDetector, FieldRole,
};
pub use document::{FieldAttributes, FieldDocument, FieldNode, FormAttributes, FormRef, NodeId};
pub use error::{DetectorError, Result};
pub use forms::LoginFormRecord;
pub use snapshot::{DocumentSnapshot, SnapshotNode};
pub use vocabulary::Vocabulary;
