//! Shared configuration structures.
//!
//! Values come from environment variables (a `.env` file is loaded first
//! when present) and fall back to the defaults below.

use std::env;

use domain::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// Service name attached to log output
    pub service_name: String,
    /// Log filter directive (e.g. "info", "identity_repository=debug")
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "identity".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl TelemetryConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            service_name: lookup("IDENTITY_SERVICE_NAME").unwrap_or(defaults.service_name),
            log_level: lookup("RUST_LOG")
                .or_else(|| lookup("IDENTITY_LOG_LEVEL"))
                .unwrap_or(defaults.log_level),
        }
    }
}

/// Enumeration paging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let max_page_size = lookup("IDENTITY_MAX_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .map(|v: u64| v.clamp(1, MAX_PAGE_SIZE))
            .unwrap_or(defaults.max_page_size);
        let default_page_size = lookup("IDENTITY_PAGE_SIZE")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.default_page_size)
            .min(max_page_size);

        Self {
            default_page_size,
            max_page_size,
        }
    }

    /// Build a request for the given page using the configured size
    pub fn page_request(&self, page: u64) -> PageRequest {
        PageRequest::new(page, self.default_page_size.min(self.max_page_size))
    }
}

/// Top-level configuration for the identity data-access layer.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IdentityConfig {
    pub telemetry: TelemetryConfig,
    pub pagination: PaginationConfig,
}

impl IdentityConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            telemetry: TelemetryConfig::from_lookup(&lookup),
            pagination: PaginationConfig::from_lookup(&lookup),
        }
    }
}
