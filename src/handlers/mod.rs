//! HTTP and WebSocket request handlers
//!
//! - `api` - Health check endpoint
//! - `recognize` - Client-streaming recognition WebSocket

pub mod api;
pub mod recognize;

// Re-export commonly used handlers for convenient access
pub use recognize::recognize_handler;
