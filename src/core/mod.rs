pub mod engine;
pub mod session;

// Re-export commonly used types for convenience
pub use engine::{DecodeStream, DecoderEngine, EngineError, Hypothesis, create_engine};
pub use session::{RecognitionSession, SessionState};
