pub mod config;
pub mod core;
pub mod errors;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
pub use config::{EngineConfig, ServerConfig};
pub use core::engine::{DecodeStream, DecoderEngine, EngineError, Hypothesis, create_engine};
pub use core::session::{RecognitionSession, SessionState};
pub use errors::{ConfigError, RecognizeError, RecognizeResult};
pub use state::AppState;
