//! Configuration loading and constants.
//!
//! Loads application configuration from a YAML file and defines constants for
//! response headers, default paths, and logging. `AppConfig` is the root
//! configuration struct; it is built once at startup and passed to dependents,
//! so nothing looks up configuration ambiently at request time. Any schema or
//! invariant violation is a fatal startup error.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::store::WeightTier;

// =============================================================================
// Response Headers
// =============================================================================
// Truth responses are randomized per request and must never be stored by
// browsers or intermediaries, so every route sends a no-store directive
// together with a content-negotiation marker.

/// Cache directive applied to every response.
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

/// Vary value marking responses as content-negotiated on Accept.
pub const VARY_ACCEPT: &str = "Accept";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "verity=debug,tower_http=info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

/// Valid lowercase weekday names, as used in config keys and response bodies.
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Truth content file settings
    pub truths: TruthsConfig,
    /// Day-of-week selection weighting
    pub selection: SelectionConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Truth content file settings
#[derive(Debug, Clone, Deserialize)]
pub struct TruthsConfig {
    /// Path to the JSON content file
    pub file: String,
    /// Minimum number of records the content file must contain
    #[serde(default = "TruthsConfig::default_min_count")]
    pub min_count: usize,
}

impl TruthsConfig {
    fn default_min_count() -> usize {
        1
    }
}

/// Day-of-week selection weighting.
///
/// Days absent from the table select uniformly over the whole store, so a
/// partial table is valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SelectionConfig {
    #[serde(default)]
    pub day_weight_table: HashMap<String, TierWeights>,
}

/// Relative weight per tier for one weekday. Normalized at selection time,
/// not at load time; only the ratios matter.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TierWeights {
    #[serde(default)]
    pub low: f64,
    #[serde(default)]
    pub medium: f64,
    #[serde(default)]
    pub high: f64,
}

impl TierWeights {
    /// Weight assigned to the given tier.
    pub fn get(&self, tier: WeightTier) -> f64 {
        match tier {
            WeightTier::Low => self.low,
            WeightTier::Medium => self.medium,
            WeightTier::High => self.high,
        }
    }

    /// Sum over all tiers.
    pub fn total(&self) -> f64 {
        self.low + self.medium + self.high
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum admitted requests per window per client address
    #[serde(default = "RateLimitConfig::default_max_requests")]
    pub max_requests: u32,
    /// Window length in seconds
    #[serde(default = "RateLimitConfig::default_window_seconds")]
    pub window_seconds: u64,
    /// Paths that bypass the rate limiter entirely
    #[serde(default = "RateLimitConfig::default_exempt_paths")]
    pub exempt_paths: Vec<String>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: Self::default_max_requests(),
            window_seconds: Self::default_window_seconds(),
            exempt_paths: Self::default_exempt_paths(),
        }
    }
}

impl RateLimitConfig {
    fn default_max_requests() -> u32 {
        100
    }

    fn default_window_seconds() -> u64 {
        3600
    }

    fn default_exempt_paths() -> Vec<String> {
        vec!["/".to_string(), "/health".to_string()]
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Cross-field invariants that serde cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        for (day, weights) in &self.selection.day_weight_table {
            if !DAY_NAMES.contains(&day.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "Unknown weekday '{}' in selection.day_weight_table",
                    day
                )));
            }
            for tier in WeightTier::ALL {
                if weights.get(tier) < 0.0 {
                    return Err(ConfigError::Validation(format!(
                        "Negative {} weight for '{}' in selection.day_weight_table",
                        tier, day
                    )));
                }
            }
            if !(weights.total() > 0.0) {
                return Err(ConfigError::Validation(format!(
                    "Weights for '{}' must sum to a positive total",
                    day
                )));
            }
        }

        if self.rate_limit.max_requests == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.max_requests must be at least 1".to_string(),
            ));
        }
        if self.rate_limit.window_seconds == 0 {
            return Err(ConfigError::Validation(
                "rate_limit.window_seconds must be at least 1".to_string(),
            ));
        }

        if self.logging.format != "text" && self.logging.format != "json" {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got \"{}\"",
                self.logging.format
            )));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Failed to parse content file: {0}")]
    Content(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
