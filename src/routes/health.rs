//! Health check endpoint for container orchestration.
//!
//! Provides a simple liveness probe that returns 200 OK when the process is
//! running. Exempt from rate limiting so probes are never throttled, and it
//! touches neither the selector nor the limiter.

use axum::Json;
use serde_json::{json, Value};

/// Health check handler.
///
/// Returns a fixed payload to indicate the service is running. This is a
/// liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
