//! Vocabulary configuration storage

use crate::error::{DetectorError, Result};
use crate::vocabulary::Vocabulary;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Load a vocabulary file, falling back to the built-in lists.
///
/// Keys missing from the file keep their defaults; a missing file yields
/// [`Vocabulary::default`].
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    if !path.exists() {
        debug!("No vocabulary file at {}, using defaults", path.display());
        return Ok(Vocabulary::default());
    }

    let content = fs::read_to_string(path)?;
    let vocabulary: Vocabulary =
        serde_json::from_str(&content).map_err(|e| DetectorError::ConfigError(e.to_string()))?;

    info!(
        "Loaded vocabulary from {} ({} username names, {} password excludes, {} search terms)",
        path.display(),
        vocabulary.username_names.len(),
        vocabulary.password_excludes.len(),
        vocabulary.search_terms.len()
    );
    Ok(vocabulary)
}

pub fn save_vocabulary(path: &Path, vocabulary: &Vocabulary) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    let content = serde_json::to_string_pretty(vocabulary)
        .map_err(|e| DetectorError::ConfigError(e.to_string()))?;

    fs::write(path, content)?;
    Ok(())
}
