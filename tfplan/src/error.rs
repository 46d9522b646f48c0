//! Error types for tfplan

/// Error type for tfplan operations
///
/// Plan modifiers and defaults report problems through diagnostics. These
/// errors cover the data plumbing underneath them: walking attribute paths
/// and converting raw Terraform values into typed values.
#[derive(Debug, thiserror::Error)]
pub enum TfplanError {
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("Attribute path not found: {0}")]
    PathNotFound(String),

    #[error("Invalid attribute path: {0}")]
    InvalidPath(String),

    #[error("Encoding error: {0}")]
    EncodingError(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),

    #[error("{0}")]
    Custom(String),
}

/// Result type alias for tfplan operations
pub type Result<T> = std::result::Result<T, TfplanError>;

impl TfplanError {
    pub(crate) fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        TfplanError::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

impl From<String> for TfplanError {
    fn from(s: String) -> Self {
        TfplanError::Custom(s)
    }
}

impl From<&str> for TfplanError {
    fn from(s: &str) -> Self {
        TfplanError::Custom(s.to_string())
    }
}

impl From<serde_json::Error> for TfplanError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            TfplanError::DecodingError(err.to_string())
        } else {
            TfplanError::EncodingError(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_mismatch_message_names_both_types() {
        let err = TfplanError::type_mismatch("string", "number");
        assert_eq!(err.to_string(), "Type mismatch: expected string, got number");
    }

    #[test]
    fn string_converts_to_custom_error() {
        let err: TfplanError = "something broke".into();
        assert!(matches!(err, TfplanError::Custom(ref s) if s == "something broke"));
    }

    #[test]
    fn json_syntax_error_is_decoding_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(TfplanError::from(err), TfplanError::DecodingError(_)));
    }
}
