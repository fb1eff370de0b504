//! API Configuration Module
//!
//! CORS settings for browser clients, loaded from environment variables
//! with permissive defaults for development.

// ============================================================================
// API CONFIGURATION
// ============================================================================

/// API configuration for CORS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    /// Example: "https://wordbank.app,https://admin.wordbank.app"
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400, // 24 hours
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `WORDBANK_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `WORDBANK_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    pub fn from_env() -> Self {
        Self::from_values(
            std::env::var("WORDBANK_CORS_ORIGINS").ok().as_deref(),
            std::env::var("WORDBANK_CORS_MAX_AGE_SECS").ok().as_deref(),
        )
    }

    fn from_values(origins: Option<&str>, max_age: Option<&str>) -> Self {
        let cors_origins = origins
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let cors_max_age_secs = max_age
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::default().cors_max_age_secs);

        Self {
            cors_origins,
            cors_max_age_secs,
        }
    }

    /// True when no origin list is configured and every origin is allowed.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty()
    }
}
