//! HTTP route handlers.
//!
//! Truth responses are randomized per request, so every route sends
//! `Cache-Control: no-store` together with `Vary: Accept`; the header layers
//! wrap the rate limiter as well, so 429 responses carry them too.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request. Unknown paths and wrong methods resolve to the same structured
//! JSON errors the handlers use.

pub mod health;
pub mod home;
pub mod truth;

use axum::{middleware, routing::get, Extension, Router};
use http::header::{HeaderName, HeaderValue, CACHE_CONTROL, VARY};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::{CACHE_CONTROL_NO_STORE, VARY_ACCEPT};
use crate::error::{AppError, AppErrorResponse};
use crate::middleware::{rate_limit_layer, request_id_layer, RequestId};
use crate::state::AppState;

/// Creates the Axum router with all routes, middleware, and response headers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health))
        .route("/truth", get(truth::random))
        .route("/truth/{id}", get(truth::by_id))
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .with_state(state.clone())
        // Rate limiter runs before any handler on non-exempt paths
        .layer(middleware::from_fn_with_state(state, rate_limit_layer))
        // Responses must never be stored: they are randomized per request
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CACHE_CONTROL_NO_STORE),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            VARY,
            HeaderValue::from_static(VARY_ACCEPT),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("x-frame-options"),
            HeaderValue::from_static("DENY"),
        ))
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}

async fn route_not_found(Extension(request_id): Extension<RequestId>) -> AppErrorResponse {
    AppErrorResponse::new(AppError::RouteNotFound, &request_id)
}

async fn method_not_allowed(Extension(request_id): Extension<RequestId>) -> AppErrorResponse {
    AppErrorResponse::new(AppError::MethodNotAllowed, &request_id)
}
