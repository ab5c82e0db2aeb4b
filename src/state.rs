//! Shared application state

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::core::engine::DecoderEngine;

/// Application state shared across all calls
///
/// Holds the configuration and the loaded decoder engine. The engine wraps
/// the shared model: immutable after startup and safe for unbounded
/// concurrent read access, so no locking sits in front of it. All mutable
/// decode state lives in per-call sessions, never here.
pub struct AppState {
    pub config: ServerConfig,
    pub engine: Arc<dyn DecoderEngine>,
}

impl AppState {
    pub fn new(config: ServerConfig, engine: Arc<dyn DecoderEngine>) -> Arc<Self> {
        Arc::new(Self { config, engine })
    }
}
