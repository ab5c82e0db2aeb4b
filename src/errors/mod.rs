//! Error types for the recognition service
//!
//! The taxonomy is deliberately small: every failure inside one call collapses
//! into one of three terminal categories that are surfaced to the client as a
//! call-level error status. Nothing is retried and nothing is swallowed.

use thiserror::Error;

use crate::core::engine::EngineError;

/// Result type for per-call recognition operations
pub type RecognizeResult<T> = Result<T, RecognizeError>;

/// Terminal errors for one recognition call
#[derive(Error, Debug)]
pub enum RecognizeError {
    /// The inbound stream broke before the client signalled end-of-stream
    #[error("Transport error: {0}")]
    Transport(String),

    /// The decoder engine reported a pipeline failure while ingesting audio
    #[error("Decode error: {0}")]
    Decode(String),

    /// Contract violation: finalize invoked twice, or feed after finalize
    #[error("Invalid session state: {0}")]
    InvalidState(&'static str),
}

impl RecognizeError {
    /// Stable error code carried on the wire alongside the human message
    pub fn code(&self) -> &'static str {
        match self {
            RecognizeError::Transport(_) => "transport_error",
            RecognizeError::Decode(_) => "decode_error",
            RecognizeError::InvalidState(_) => "invalid_state",
        }
    }
}

impl From<EngineError> for RecognizeError {
    fn from(err: EngineError) -> Self {
        RecognizeError::Decode(err.to_string())
    }
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// An environment variable held a value of the wrong shape
    #[error("Invalid value for {var}: {value}")]
    InvalidEnvValue { var: &'static str, value: String },

    /// Semantic validation failed after merging all sources
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_are_stable() {
        assert_eq!(
            RecognizeError::Transport("eof".into()).code(),
            "transport_error"
        );
        assert_eq!(RecognizeError::Decode("bad".into()).code(), "decode_error");
        assert_eq!(
            RecognizeError::InvalidState("finalize called twice").code(),
            "invalid_state"
        );
    }

    #[test]
    fn test_engine_error_maps_to_decode() {
        let err: RecognizeError = EngineError::Decode("pipeline corrupted".into()).into();
        assert!(matches!(err, RecognizeError::Decode(_)));
        assert!(err.to_string().contains("pipeline corrupted"));
    }
}
