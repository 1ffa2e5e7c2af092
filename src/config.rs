use crate::error::{AppError, Result};

pub const LISTINGS_API_URL: &str = "https://api.repliers.io";
pub const IMAGE_BASE_URL: &str = "https://cdn.repliers.io";
pub const LISTING_LINK_BASE: &str = "https://www.realtor.ca/mls";

/// Header the upstream provider reads the credential from.
pub const API_KEY_HEADER: &str = "REPLIERS-API-KEY";

/// Upstream listing status filter. `A` = active.
pub const ACTIVE_STATUS: &str = "A";

/// Upstream request timeout (seconds).
pub const UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Bargain thresholds.
pub mod bargain_thresholds {
    /// Days on market at or above which a listing is "long time no sold".
    pub const STALE_DAYS: i64 = 60;
    /// Possession within this many days of now is a "quicky".
    pub const QUICK_POSSESSION_DAYS: i64 = 30;
    /// List price at or above original * this is a "huge profit".
    pub const HUGE_PROFIT_MULTIPLIER: f64 = 2.0;
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream credential (REPLIERS_API_KEY). Absence is reported per search.
    pub api_key: Option<String>,
    pub listings_api_url: String,
    /// Province filter sent upstream (PROVINCE)
    pub province: String,
    /// Page size requested from the provider (RESULTS_PER_PAGE)
    pub results_per_page: u32,
    /// Prefix for relative image paths (IMAGE_BASE_URL)
    pub image_base_url: String,
    /// Public listing page base; MLS number is appended (LISTING_LINK_BASE)
    pub listing_link_base: String,
    pub api_port: u16,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            api_key: var("REPLIERS_API_KEY")
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            listings_api_url: var("LISTINGS_API_URL")
                .unwrap_or_else(|| LISTINGS_API_URL.to_string()),
            province: var("PROVINCE").unwrap_or_else(|| "ON".to_string()),
            results_per_page: var("RESULTS_PER_PAGE")
                .unwrap_or_else(|| "100".to_string())
                .parse::<u32>()
                .unwrap_or(100),
            image_base_url: var("IMAGE_BASE_URL").unwrap_or_else(|| IMAGE_BASE_URL.to_string()),
            listing_link_base: var("LISTING_LINK_BASE")
                .unwrap_or_else(|| LISTING_LINK_BASE.to_string()),
            api_port: var("API_PORT")
                .unwrap_or_else(|| "3001".to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }
}
