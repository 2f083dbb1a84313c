//! Request ID and rate limiting middleware.
//!
//! The request-id layer is the outermost layer: it generates a UUID v4 for
//! each incoming request, stores it in request extensions, and wraps the rest
//! of the pipeline in a tracing span so every log line within a request
//! carries the request_id field.
//!
//! The rate-limit layer sits inside it and guards every non-exempt path
//! before a handler runs.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::error::{AppError, AppErrorResponse};
use crate::rate_limit::Decision;
use crate::state::AppState;

/// Extension type for accessing the request ID in handlers.
#[derive(Clone, Debug)]
pub struct RequestId(pub Uuid);

/// Fallback limiter key when the transport gave us no peer address. Only
/// reachable when the router is driven without connect info (tests).
const UNKNOWN_CLIENT: &str = "unknown";

/// Middleware that generates a request ID and creates a request span.
pub async fn request_id_layer(mut request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let start = Instant::now();
    request.extensions_mut().insert(RequestId(request_id));

    async move {
        let response = next.run(request).await;
        tracing::info!(
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Request completed"
        );
        response
    }
    .instrument(span)
    .await
}

/// Middleware enforcing the per-address request quota.
///
/// The client key is taken strictly from the transport-level remote address;
/// forwarded-for headers are never consulted, so the limit cannot be dodged
/// by header spoofing. Exempt paths (health probes, the documentation root)
/// skip the limiter entirely.
pub async fn rate_limit_layer(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppErrorResponse> {
    let path = request.uri().path();
    if state
        .config
        .rate_limit
        .exempt_paths
        .iter()
        .any(|exempt| exempt == path)
    {
        return Ok(next.run(request).await);
    }

    let client_key = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string());

    match state
        .limiter
        .check_and_increment(&client_key, Instant::now())
    {
        Decision::Admitted => Ok(next.run(request).await),
        Decision::Rejected {
            retry_after_seconds,
        } => {
            let request_id = request
                .extensions()
                .get::<RequestId>()
                .cloned()
                .unwrap_or_else(|| RequestId(Uuid::new_v4()));
            tracing::warn!(
                client = %client_key,
                retry_after_seconds,
                "Rate limit exceeded"
            );
            Err(AppErrorResponse::new(
                AppError::RateLimited {
                    retry_after_seconds,
                },
                &request_id,
            ))
        }
    }
}
