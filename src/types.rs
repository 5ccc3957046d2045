use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{CHEMIST_WAREHOUSE_BASE, WOOLWORTHS_BASE};

// ---------------------------------------------------------------------------
// Retailer
// ---------------------------------------------------------------------------

/// The closed set of supported retailer page layouts. Each variant has its
/// own extraction rules and reference-price convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Retailer {
    /// Publishes an absolute "Savings" amount next to the current price.
    ChemistWarehouse,
    /// Publishes a strikethrough "was" price distinct from the current price.
    Woolworths,
}

impl Retailer {
    /// Full product page URL for a site-specific path segment.
    pub fn product_url(&self, product_id: &str) -> String {
        match self {
            Retailer::ChemistWarehouse => format!("{CHEMIST_WAREHOUSE_BASE}{product_id}"),
            Retailer::Woolworths => format!("{WOOLWORTHS_BASE}{product_id}"),
        }
    }

    /// Transcript section heading, underlined with dashes to its own length.
    pub fn section_title(&self) -> &'static str {
        match self {
            Retailer::ChemistWarehouse => "CHEMIST WAREHOUSE ITEMS",
            Retailer::Woolworths => "WOOLIES ITEMS",
        }
    }
}

impl std::fmt::Display for Retailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Retailer::ChemistWarehouse => "chemist_warehouse",
            Retailer::Woolworths => "woolworths",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Watchlist input
// ---------------------------------------------------------------------------

/// One watched product. Immutable, loaded once at startup.
#[derive(Debug, Clone)]
pub struct WatchEntry {
    pub retailer: Retailer,
    /// Display key, unique per retailer. Used in alerts and history rows.
    pub reference_name: String,
    /// Site-specific path segment appended to the retailer base URL.
    pub product_id: String,
}

// ---------------------------------------------------------------------------
// Reference price
// ---------------------------------------------------------------------------

/// A pre-discount reference value, in the form the retailer exposes it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefPrice {
    /// Absolute currency amount saved off the original price.
    /// The original is reconstructed as savings + current.
    Savings(f64),
    /// The pre-discount price itself.
    Was(f64),
}

/// Outcome of looking for a reference price on a product page.
///
/// A missing reference element is a normal no-discount outcome; text that is
/// present but does not parse as currency is surfaced separately so layout
/// shifts show up in the log instead of vanishing.
#[derive(Debug, Clone, PartialEq)]
pub enum RefOutcome {
    Present(RefPrice),
    Absent,
    Unparseable(String),
}

/// Extractor output for one product page.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuote {
    pub name: String,
    pub price: f64,
    pub reference: RefOutcome,
}

// ---------------------------------------------------------------------------
// Persistence and alerting
// ---------------------------------------------------------------------------

/// One recorded price point, persisted at most once per product per ISO week.
#[derive(Debug, Clone)]
pub struct PriceObservation {
    pub reference_name: String,
    pub product_name: String,
    pub product_id: String,
    pub url: String,
    pub price: f64,
    pub percentage_drop: u32,
    pub date_scanned: NaiveDate,
}

/// A qualifying drop, held for the duration of one run and consumed exactly
/// once by the alerting step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertEntry {
    pub reference_name: String,
    pub percentage_drop: u32,
}

impl std::fmt::Display for AlertEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (-{}%)", self.reference_name, self.percentage_drop)
    }
}
