use crate::error::{AppError, Result};

pub const CHEMIST_WAREHOUSE_BASE: &str = "https://www.chemistwarehouse.com.au/buy/";
pub const WOOLWORTHS_BASE: &str = "https://www.woolworths.com.au/shop/productdetails/";

/// Seconds to wait for a required element to appear after navigation.
/// Woolworths renders prices client-side, so the first source dump is
/// frequently missing the price nodes.
pub const WAIT_DELAY_SECS: u64 = 2;

/// Maximum fetch attempts per product before giving up and reporting a
/// network error. The budget applies per product, never across the run.
pub const FETCH_RETRIES: u32 = 5;

/// Poll interval (milliseconds) while waiting for a readiness selector to
/// match in the rendered source.
pub const READY_POLL_INTERVAL_MS: u64 = 250;

/// Minimum percentage drop that qualifies a product for the desktop alert
/// when DROP_THRESHOLD is not set.
pub const DEFAULT_DROP_THRESHOLD: u32 = 20;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the watchlist document (WATCHLIST_PATH).
    pub watchlist_path: String,
    /// Path of the run transcript, overwritten each run (LOG_PATH).
    pub log_path: String,
    /// SQLite price history location (DB_PATH).
    pub db_path: String,
    /// WebDriver endpoint, e.g. a local geckodriver (WEBDRIVER_URL).
    pub webdriver_url: String,
    /// Minimum percentage drop that triggers the alert (DROP_THRESHOLD).
    pub drop_threshold: u32,
    pub log_level: String,
    /// Run the browser without a visible window (HEADLESS).
    pub headless: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            watchlist_path: std::env::var("WATCHLIST_PATH")
                .unwrap_or_else(|_| "watchlist.json".to_string()),
            log_path: std::env::var("LOG_PATH").unwrap_or_else(|_| "log.txt".to_string()),
            db_path: std::env::var("DB_PATH").unwrap_or_else(|_| "prices.db".to_string()),
            webdriver_url: std::env::var("WEBDRIVER_URL")
                .unwrap_or_else(|_| "http://localhost:4444".to_string()),
            drop_threshold: std::env::var("DROP_THRESHOLD")
                .unwrap_or_else(|_| DEFAULT_DROP_THRESHOLD.to_string())
                .parse::<u32>()
                .map_err(|_| {
                    AppError::Config("DROP_THRESHOLD must be a whole percentage".to_string())
                })?,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            headless: std::env::var("HEADLESS")
                .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
                .unwrap_or(true),
        })
    }
}
