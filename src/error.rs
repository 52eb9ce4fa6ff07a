//! Error types with actionable diagnostics.
//!
//! Construction-time failures carry enough context to fix the offending
//! configuration without reading the source. Arithmetic anomalies during a
//! step are never reported here; they surface as non-finite tensor values.

use crate::config::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for adamr operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or configuring an optimizer.
#[derive(Debug, Error)]
pub enum Error {
    /// `recover_level` outside `[0, 1]` (or NaN).
    #[error("Invalid recover_level: {value} (group {group})\n  → recover_level must lie in [0.0, 1.0]")]
    InvalidRecoverLevel { group: usize, value: f32 },

    /// The same tensor storage was handed to the optimizer twice.
    #[error("Parameter appears in more than one place (group {group}, index {index})\n  → Each tensor may belong to exactly one parameter group")]
    DuplicateParameter { group: usize, index: usize },

    /// No parameter groups were supplied.
    #[error("Optimizer got an empty parameter list\n  → Pass at least one parameter group")]
    EmptyParamGroups,

    /// Optimizer spec failed validation.
    #[error("Invalid optimizer spec: {0}")]
    Validation(#[from] ValidationError),

    /// Spec file could not be read.
    #[error("Failed to read optimizer spec {}\n  Cause: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Spec file is not valid YAML for an optimizer spec.
    #[error("Invalid optimizer spec syntax: {0}\n  → Check YAML syntax at the indicated line")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create an IO error for a spec path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Check if this error stems from user-supplied configuration.
    pub fn is_config_error(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_recover_level_message() {
        let err = Error::InvalidRecoverLevel { group: 2, value: 1.5 };
        let msg = err.to_string();
        assert!(msg.contains("1.5"));
        assert!(msg.contains("group 2"));
        assert!(msg.contains("[0.0, 1.0]"));
    }

    #[test]
    fn test_duplicate_parameter_message() {
        let err = Error::DuplicateParameter { group: 1, index: 0 };
        assert!(err.to_string().contains("group 1, index 0"));
    }

    #[test]
    fn test_io_error_is_not_config_error() {
        let err = Error::io(
            "missing.yaml",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_validation_error_converts() {
        let err: Error = ValidationError::InvalidLearningRate(0.0).into();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("learning rate"));
    }
}
