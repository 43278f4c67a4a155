//! Error types for the body_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for body_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record file location does not name a JSON record
    #[error("{0}")]
    InvalidLocation(String),

    /// Schema file is missing or malformed
    #[error("Schema load error: {0}")]
    SchemaLoad(String),

    /// Record does not conform to the structural schema
    #[error("Schema validation error: {0}")]
    SchemaValidation(String),

    /// Solicited input did not match the field's pattern
    #[error("{input} does not match {expected} pattern")]
    Validation { input: String, expected: String },

    /// Metric could not be computed from the recorded measurements
    #[error("Metric error: {0}")]
    Metric(String),
}

impl Error {
    /// Build a field-validation error from the offending raw text and the
    /// name of the expected pattern.
    pub fn pattern(input: &str, expected: &str) -> Self {
        Error::Validation {
            input: input.to_string(),
            expected: expected.to_string(),
        }
    }

    /// Whether this error aborts only the in-progress field solicitation or
    /// metric computation. Store-level errors are fatal and must propagate.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Validation { .. } | Error::Metric(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message() {
        let err = Error::pattern("5'12\"", "height");
        assert_eq!(err.to_string(), "5'12\" does not match height pattern");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(Error::pattern("x", "age").is_recoverable());
        assert!(Error::Metric("waist must exceed neck".into()).is_recoverable());
        assert!(!Error::SchemaValidation("bad record".into()).is_recoverable());
        assert!(!Error::SchemaLoad("missing".into()).is_recoverable());
        assert!(!Error::InvalidLocation("user.txt".into()).is_recoverable());
    }
}
