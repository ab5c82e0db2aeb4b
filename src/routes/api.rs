//! Health check route configuration

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::handlers::api::health_check;
use crate::state::AppState;

/// Create the health check router
///
/// # Endpoints
///
/// - `GET /` - health check
/// - `GET /health` - health check
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
}
