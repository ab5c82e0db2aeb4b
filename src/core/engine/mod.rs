//! Decoder engine abstraction
//!
//! The recognition core consumes a decoding engine through two narrow traits:
//! [`DecoderEngine`] wraps the expensive, load-once model shared by every
//! call, and [`DecodeStream`] is the mutable per-call decode state it hands
//! out. Any conforming backend is substitutable; the built-in one is the
//! Vosk (libkaldi) backend behind the `vosk` cargo feature.

pub mod audio;
#[cfg(feature = "vosk")]
pub mod vosk;

use std::sync::Arc;

use thiserror::Error;

use crate::config::EngineConfig;

/// One ranked transcript candidate as produced by the engine.
///
/// `confidence` is the engine's raw score, passed through without
/// normalization. Its range and monotonicity are backend-defined; it must not
/// be read as a calibrated probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Hypothesis {
    pub transcript: String,
    pub confidence: f32,
}

/// Errors reported by decoder backends
#[derive(Error, Debug)]
pub enum EngineError {
    /// The shared model could not be loaded at startup
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// A per-call decode stream could not be initialized
    #[error("Failed to initialize decode stream: {0}")]
    StreamInit(String),

    /// The decode pipeline failed while processing audio
    #[error("Decode pipeline failure: {0}")]
    Decode(String),

    /// The engine configuration is unusable
    #[error("Engine configuration error: {0}")]
    Configuration(String),
}

/// A loaded decoding model, shared read-only by all concurrent calls.
///
/// Implementations must be safe for unbounded concurrent `start_stream`
/// calls; no interior locking is expected of callers.
pub trait DecoderEngine: Send + Sync {
    /// Backend name, for logs and the health endpoint
    fn name(&self) -> &'static str;

    /// Create fresh, isolated decode state for one call.
    ///
    /// The returned stream must not share mutable state with any other
    /// stream: feeding one call must never influence another call's result.
    fn start_stream(&self) -> Result<Box<dyn DecodeStream>, EngineError>;
}

/// Mutable decode state for exactly one call.
///
/// Owned by a single session and dropped when the call handler returns; all
/// backend resources are released in `Drop`.
pub trait DecodeStream: Send {
    /// Ingest one audio chunk. Chunks must arrive in order.
    fn feed(&mut self, chunk: &[u8]) -> Result<(), EngineError>;

    /// Close ingestion and extract up to `max_alternatives` ranked
    /// hypotheses, in the order the engine produces them.
    fn finalize(&mut self, max_alternatives: u32) -> Result<Vec<Hypothesis>, EngineError>;
}

/// Create the configured decoder backend.
///
/// Fails at startup (not at call time) when the backend is unknown or was
/// compiled out.
pub fn create_engine(config: &EngineConfig) -> Result<Arc<dyn DecoderEngine>, EngineError> {
    match config.backend.as_str() {
        #[cfg(feature = "vosk")]
        "vosk" => Ok(Arc::new(vosk::VoskEngine::new(config)?)),
        #[cfg(not(feature = "vosk"))]
        "vosk" => Err(EngineError::Configuration(
            "decoder backend 'vosk' requires building with the 'vosk' feature".to_string(),
        )),
        other => Err(EngineError::Configuration(format!(
            "Unsupported decoder backend: {other}. Supported backends: vosk"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn engine_config(backend: &str) -> EngineConfig {
        EngineConfig {
            backend: backend.to_string(),
            model_path: PathBuf::from("models/english"),
            sample_rate: 8000,
        }
    }

    #[test]
    fn test_create_engine_rejects_unknown_backend() {
        let err = create_engine(&engine_config("nnet9000")).err().unwrap();
        assert!(matches!(err, EngineError::Configuration(_)));
        assert!(err.to_string().contains("nnet9000"));
    }

    #[cfg(not(feature = "vosk"))]
    #[test]
    fn test_create_engine_reports_compiled_out_backend() {
        let err = create_engine(&engine_config("vosk")).err().unwrap();
        assert!(err.to_string().contains("vosk' feature"));
    }
}
