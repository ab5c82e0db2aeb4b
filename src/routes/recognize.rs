//! Recognition WebSocket route configuration

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::recognize::recognize_handler;
use crate::state::AppState;

/// Create the recognition WebSocket router
///
/// # Endpoint
///
/// `GET /recognize` - WebSocket upgrade carrying one client-streaming
/// recognition call.
///
/// # Protocol
///
/// After the upgrade, the client streams:
/// 1. Zero or more `audio` messages (base64 content, optional
///    `config.max_alternatives` and `uuid` — last received values win), or
///    bare binary frames with raw chunk bytes
/// 2. One `end_of_stream` message
///
/// The server replies with exactly one message — `result` with ranked
/// alternatives, or `error` with a terminal status — and closes.
///
/// # Example
///
/// ```json
/// // Client
/// {"type": "audio", "audio": {"content": "<base64>"}, "config": {"max_alternatives": 10}, "uuid": "b7d1"}
/// {"type": "end_of_stream"}
///
/// // Server
/// {"type": "result", "results": [{"alternatives": [{"transcript": "hello", "confidence": 0.92}]}]}
/// ```
pub fn create_recognize_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recognize", get(recognize_handler))
        .layer(TraceLayer::new_for_http())
}
