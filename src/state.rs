//! Shared application state for request handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::rate_limit::RateLimiter;
use crate::store::TruthStore;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// The configuration and truth store are read-only after startup; the rate
/// limiter is the only mutable shared state and handles its own locking.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<TruthStore>,
    pub limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Creates application state from loaded configuration and content.
    pub fn new(config: AppConfig, store: TruthStore) -> Self {
        let limiter = RateLimiter::new(
            config.rate_limit.max_requests,
            Duration::from_secs(config.rate_limit.window_seconds),
        );
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            limiter: Arc::new(limiter),
        }
    }
}
