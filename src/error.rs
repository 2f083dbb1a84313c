//! Per-request error taxonomy and its JSON rendering.
//!
//! Startup failures use `config::ConfigError` and never reach this type. All
//! errors here render as the structured body
//! `{error, message, request_id, retry_after_seconds}` so clients can always
//! correlate a failure with the server-side request log. No internal detail
//! leaks into an error body.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use uuid::Uuid;

use crate::middleware::RequestId;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Too many requests.")]
    RateLimited { retry_after_seconds: u64 },

    #[error("No truth with id '{0}'")]
    TruthNotFound(String),

    #[error("Endpoint not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::TruthNotFound(_) | AppError::RouteNotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Stable machine-readable error tag.
    fn kind(&self) -> &'static str {
        match self {
            AppError::RateLimited { .. } => "rate_limited",
            AppError::TruthNotFound(_) | AppError::RouteNotFound => "not_found",
            AppError::MethodNotAllowed => "method_not_allowed",
        }
    }

    fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            AppError::RateLimited {
                retry_after_seconds,
            } => Some(*retry_after_seconds),
            _ => None,
        }
    }
}

/// An error paired with the request id generated by the request-id
/// middleware, so every error body is traceable.
#[derive(Debug)]
pub struct AppErrorResponse {
    error: AppError,
    request_id: Uuid,
}

impl AppErrorResponse {
    pub fn new(error: AppError, request_id: &RequestId) -> Self {
        Self {
            error,
            request_id: request_id.0,
        }
    }
}

impl IntoResponse for AppErrorResponse {
    fn into_response(self) -> Response {
        let status = self.error.status();
        let retry_after = self.error.retry_after_seconds();
        let body = json!({
            "error": self.error.kind(),
            "message": self.error.to_string(),
            "request_id": self.request_id.to_string(),
            "retry_after_seconds": retry_after,
        });

        let mut response = (status, Json(body)).into_response();
        if let Some(seconds) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

/// Attaches the request id to error results inside handlers.
pub trait ResultExt<T> {
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<AppError>,
{
    fn with_request_id(self, request_id: &RequestId) -> Result<T, AppErrorResponse> {
        self.map_err(|error| AppErrorResponse::new(error.into(), request_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_id() -> RequestId {
        RequestId(Uuid::new_v4())
    }

    #[test]
    fn test_rate_limited_maps_to_429_with_retry_header() {
        let response = AppErrorResponse::new(
            AppError::RateLimited {
                retry_after_seconds: 120,
            },
            &request_id(),
        )
        .into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "120"
        );
    }

    #[test]
    fn test_not_found_maps_to_404_without_retry_header() {
        let response =
            AppErrorResponse::new(AppError::TruthNotFound("x".to_string()), &request_id())
                .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[test]
    fn test_error_messages_are_stable() {
        assert_eq!(
            AppError::RateLimited {
                retry_after_seconds: 1
            }
            .to_string(),
            "Too many requests."
        );
        assert_eq!(AppError::RouteNotFound.to_string(), "Endpoint not found");
    }
}
