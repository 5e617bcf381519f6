//! Vocabularies used by the classifiers
//!
//! Built-in English/German term lists, overridable through a JSON file
//! (see [`crate::config`]).

use crate::normalize::{alphanumeric_strip, separator_strip, words};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Identifier-related terms that mark a username field (English and German)
pub const USERNAME_NAMES: &[&str] = &[
    "username",
    "user",
    "user-name",
    "userid",
    "user_id",
    "login",
    "login-name",
    "loginid",
    "account",
    "account-name",
    "identifier",
    "email",
    "e-mail",
    "email-address",
    "mail",
    "benutzer",
    "benutzername",
    "benutzerkennung",
    "nutzername",
    "anmeldename",
    "anmeldung",
    "kennung",
    "konto",
    "e-mail-adresse",
    "mailadresse",
];

/// Terms that disqualify a password candidate: hints, captchas, one-time codes
pub const PASSWORD_EXCLUDES: &[&str] = &[
    "hint",
    "captcha",
    "otp",
    "one-time",
    "onetime",
    "totp",
    "2fa",
    "mfa",
    "two-factor",
    "verification",
    "verification-code",
    "verify-code",
    "security-code",
    "auth-code",
    "hinweis",
    "merkhilfe",
    "bestaetigungscode",
    "sicherheitscode",
];

/// Words that mark a site-search control
pub const SEARCH_TERMS: &[&str] = &["search", "query", "find", "go"];

/// Term lists used for field classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    pub username_names: Vec<String>,
    pub password_excludes: Vec<String>,
    pub search_terms: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            username_names: to_owned(USERNAME_NAMES),
            password_excludes: to_owned(PASSWORD_EXCLUDES),
            search_terms: to_owned(SEARCH_TERMS),
        }
    }
}

fn to_owned(terms: &[&str]) -> Vec<String> {
    terms.iter().map(|t| t.to_string()).collect()
}

impl Vocabulary {
    /// Normalize every list the way its classifier compares it.
    ///
    /// Username names are alphanumeric-stripped, exclude terms are
    /// separator-stripped and search terms must be a single word as
    /// produced by [`words`]. Entries that normalize to nothing are
    /// dropped, as are duplicates.
    pub fn prepared(&self) -> Self {
        Self {
            username_names: normalize_all(&self.username_names, alphanumeric_strip),
            password_excludes: normalize_all(&self.password_excludes, separator_strip),
            search_terms: normalize_all(&self.search_terms, single_word),
        }
    }
}

/// Search fields are matched word by word, so a term spanning several
/// words could never match and is dropped.
fn single_word(term: &str) -> String {
    match words(term).as_slice() {
        [word] => word.clone(),
        [] => String::new(),
        _ => {
            warn!("Ignoring search term '{}': not a single word", term);
            String::new()
        }
    }
}

fn normalize_all(terms: &[String], normalize: impl Fn(&str) -> String) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(terms.len());
    for term in terms {
        let normalized = normalize(term);
        if !normalized.is_empty() && !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}
