//! Error types for screening operations.

use std::fmt;

/// Which persisted artifact an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Ordered training column schema with categorical domains.
    Schema,
    /// Per-column standardization parameters.
    Scaler,
    /// Condition → classifier mapping.
    Ensemble,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Schema => "schema",
            ArtifactKind::Scaler => "scaler",
            ArtifactKind::Ensemble => "ensemble",
        };
        f.write_str(name)
    }
}

/// Error type for screening operations.
#[derive(Debug)]
pub enum ScreeningError {
    /// A required artifact is missing, unreadable, or malformed.
    ArtifactUnavailable { artifact: ArtifactKind, reason: String },
    /// The process-wide context was requested before it was loaded.
    ContextUninitialised,
    /// Schema descriptor was written with a different contract version.
    SchemaVersion { expected: u32, found: u32 },
    /// The training column schema is empty or unusable.
    SchemaMismatch(String),
    /// Row length disagrees with the fitted parameter length.
    DimensionMismatch { expected: usize, got: usize },
    /// Input record is incomplete or out of range.
    InvalidRecord(String),
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// Serialization or deserialization error.
    SerializationError(String),
    /// I/O error during file operations.
    IoError(String),
}

impl ScreeningError {
    pub(crate) fn artifact(artifact: ArtifactKind, reason: impl fmt::Display) -> Self {
        ScreeningError::ArtifactUnavailable {
            artifact,
            reason: reason.to_string(),
        }
    }

    /// Whether the error is caused by the loaded artifact set rather than the input.
    pub fn is_artifact_error(&self) -> bool {
        matches!(
            self,
            ScreeningError::ArtifactUnavailable { .. }
                | ScreeningError::ContextUninitialised
                | ScreeningError::SchemaVersion { .. }
                | ScreeningError::SchemaMismatch(_)
                | ScreeningError::DimensionMismatch { .. }
        )
    }

    /// Text a presentation layer shows instead of a partial result.
    pub fn user_message(&self) -> &'static str {
        if self.is_artifact_error() {
            "Assessment unavailable. Please try again later or contact support."
        } else {
            "Assessment unavailable. Please check your answers and try again."
        }
    }
}

impl fmt::Display for ScreeningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreeningError::ArtifactUnavailable { artifact, reason } => {
                write!(f, "Artifact unavailable ({}): {}", artifact, reason)
            }
            ScreeningError::ContextUninitialised => {
                write!(f, "Inference context has not been initialised")
            }
            ScreeningError::SchemaVersion { expected, found } => {
                write!(
                    f,
                    "Schema version mismatch: expected v{}, found v{}",
                    expected, found
                )
            }
            ScreeningError::SchemaMismatch(msg) => {
                write!(f, "Schema mismatch: {}", msg)
            }
            ScreeningError::DimensionMismatch { expected, got } => {
                write!(
                    f,
                    "Dimension mismatch: expected {} features, got {}",
                    expected, got
                )
            }
            ScreeningError::InvalidRecord(msg) => {
                write!(f, "Invalid record: {}", msg)
            }
            ScreeningError::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
            ScreeningError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            ScreeningError::IoError(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ScreeningError {}

impl From<std::io::Error> for ScreeningError {
    fn from(err: std::io::Error) -> Self {
        ScreeningError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for ScreeningError {
    fn from(err: bincode::Error) -> Self {
        ScreeningError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for ScreeningError {
    fn from(err: serde_json::Error) -> Self {
        ScreeningError::SerializationError(err.to_string())
    }
}

impl From<csv::Error> for ScreeningError {
    fn from(err: csv::Error) -> Self {
        ScreeningError::IoError(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ScreeningError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_artifact_unavailable() {
        let err = ScreeningError::artifact(ArtifactKind::Scaler, "file not found");
        let text = err.to_string();
        assert!(text.contains("Artifact unavailable"));
        assert!(text.contains("scaler"));
    }

    #[test]
    fn test_error_display_schema_version() {
        let err = ScreeningError::SchemaVersion {
            expected: 1,
            found: 2,
        };
        assert!(err.to_string().contains("expected v1, found v2"));
    }

    #[test]
    fn test_error_display_dimension_mismatch() {
        let err = ScreeningError::DimensionMismatch {
            expected: 12,
            got: 11,
        };
        assert!(err.to_string().contains("Dimension mismatch"));
    }

    #[test]
    fn test_error_display_invalid_record() {
        let err = ScreeningError::InvalidRecord("age 12 outside 16..=60".to_string());
        assert!(err.to_string().contains("Invalid record"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: ScreeningError = io_err.into();
        assert!(matches!(err, ScreeningError::IoError(_)));
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let bincode_result: std::result::Result<String, bincode::Error> =
            bincode::deserialize(bad_bytes);
        if let Err(e) = bincode_result {
            let err: ScreeningError = e.into();
            assert!(matches!(err, ScreeningError::SerializationError(_)));
        }
    }

    #[test]
    fn test_error_from_json_error() {
        let json_err = serde_json::from_str::<Vec<String>>("{not json").unwrap_err();
        let err: ScreeningError = json_err.into();
        assert!(matches!(err, ScreeningError::SerializationError(_)));
    }

    #[test]
    fn test_user_message_never_leaks_details() {
        let err = ScreeningError::artifact(ArtifactKind::Ensemble, "/secret/path missing");
        assert!(err.is_artifact_error());
        assert!(!err.user_message().contains("/secret/path"));
        assert!(err.user_message().starts_with("Assessment unavailable"));

        let input = ScreeningError::InvalidRecord("age".to_string());
        assert!(!input.is_artifact_error());
    }

    #[test]
    fn test_uninitialised_context_is_artifact_error() {
        let err = ScreeningError::ContextUninitialised;
        assert!(err.to_string().contains("not been initialised"));
        assert!(err.is_artifact_error());
    }

    #[test]
    fn test_error_is_std_error() {
        let err = ScreeningError::EmptyData("no rows".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
