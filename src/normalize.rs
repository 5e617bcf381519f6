//! Text normalization
//!
//! Password rules and username rules normalize differently. Keep them apart:
//! merging the two would change what matches.

/// Lowercase and drop whitespace, `_` and `-`.
///
/// Used for password-related substring checks, so `"Password_Hint"` and
/// `"password hint"` both become `"passwordhint"`.
pub fn separator_strip(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Lowercase and keep only letters and digits.
///
/// Used for username matching: `"E-Mail Adresse:"` becomes `"emailadresse"`.
/// Letters outside ASCII are kept; only ASCII letters are case-folded.
pub fn alphanumeric_strip(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Split a value into lowercase words on non-letter boundaries and on
/// camel-case transitions (`searchQuery` -> `search`, `query`).
///
/// Any alphabetic character, ASCII or not, belongs to a word.
pub fn words(value: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in value.chars() {
        if !c.is_alphabetic() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }

        if prev_lower && c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase();
        current.push(c.to_ascii_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
