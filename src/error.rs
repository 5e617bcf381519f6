//! Error Types for the Field Detector
//!
//! Classification never fails; errors only come from reading snapshots and
//! vocabulary files.

use thiserror::Error;

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, DetectorError>;

/// Main error type for the crate
#[derive(Error, Debug)]
pub enum DetectorError {
    // ===== I/O Errors =====
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ===== Configuration Errors =====
    /// Vocabulary file could not be parsed or written
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // ===== Snapshot Errors =====
    /// Snapshot JSON could not be parsed
    #[error("Snapshot parse error: {0}")]
    SnapshotError(String),

    /// Snapshot parsed but describes an impossible tree
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    // ===== Output Errors =====
    /// Detection results could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl DetectorError {
    /// Check if this error was caused by the input document rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            DetectorError::SnapshotError(_) | DetectorError::InvalidSnapshot(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_input_error() {
        assert!(DetectorError::SnapshotError("bad json".into()).is_input_error());
        assert!(DetectorError::InvalidSnapshot("cycle".into()).is_input_error());
        assert!(!DetectorError::ConfigError("oops".into()).is_input_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let err: DetectorError = std::io::Error::from(std::io::ErrorKind::NotFound).into();
        assert!(matches!(err, DetectorError::IoError(_)));
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_display() {
        let err = DetectorError::InvalidSnapshot("node 3 has parent 7".into());
        assert_eq!(err.to_string(), "Invalid snapshot: node 3 has parent 7");
    }
}
