//! Route configuration
//!
//! - `api` - health check routes
//! - `recognize` - the recognition WebSocket endpoint

pub mod api;
pub mod recognize;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Assemble the full application router
pub fn create_router() -> Router<Arc<AppState>> {
    api::create_api_router().merge(recognize::create_recognize_router())
}
