mod chemist_warehouse;
mod woolworths;

use std::sync::OnceLock;

use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

use crate::types::{ProductQuote, Retailer};

/// Per-product extraction failure. Never fatal to the run: the product is
/// logged and skipped, and the loop moves on to the next entry.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("required element missing: {0}")]
    MissingElement(&'static str),

    #[error("price text {0:?} is not a currency amount")]
    BadPrice(String),
}

/// Parse rendered page content using the retailer's layout rules.
pub fn extract(retailer: Retailer, html: &str) -> Result<ProductQuote, ExtractError> {
    match retailer {
        Retailer::ChemistWarehouse => chemist_warehouse::extract(html),
        Retailer::Woolworths => woolworths::extract(html),
    }
}

/// CSS selector the fetcher should wait for before handing over the page,
/// or `None` when the layout is server-rendered and ready immediately.
pub fn ready_selector(retailer: Retailer) -> Option<&'static str> {
    match retailer {
        Retailer::ChemistWarehouse => None,
        Retailer::Woolworths => Some(woolworths::READY_SELECTOR),
    }
}

/// Text of the first element matching `css`, whitespace-squeezed.
/// `None` when the element is absent or empty.
fn text_of(doc: &Html, css: &str) -> Option<String> {
    let selector = Selector::parse(css).unwrap();
    let element = doc.select(&selector).next()?;
    let text: String = element.text().collect::<Vec<_>>().join(" ");
    let squeezed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if squeezed.is_empty() {
        None
    } else {
        Some(squeezed)
    }
}

/// First dollar amount in `text`, e.g. "$12.99" or "Save $3.50" → 3.50.
fn parse_currency(text: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\$\s*([0-9]+(?:\.[0-9]+)?)").unwrap());
    re.captures(text)?.get(1)?.as_str().parse().ok()
}

/// First bare decimal in `text`, e.g. "was $10.00" → 10.00. Woolworths
/// prints its was-price without a reliable leading symbol position.
fn parse_decimal(text: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"([0-9]+\.[0-9]+)").unwrap());
    re.captures(text)?.get(1)?.as_str().parse().ok()
}
