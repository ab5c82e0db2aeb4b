//! Recognition call handling
//!
//! - `handler` - the WebSocket call dispatcher
//! - `messages` - wire message types for the recognition protocol

mod handler;
pub mod messages;

pub use handler::recognize_handler;
