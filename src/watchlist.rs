use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::types::{Retailer, WatchEntry};

/// On-disk watchlist document: two named groups, each mapping a display key
/// to a site-specific product path segment.
///
/// ```json
/// {
///   "Chemist_Warehouse": { "Fish Oil 400": "89846/..." },
///   "Woolworths": { "Coffee 1kg": "257360/..." }
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchlistDoc {
    #[serde(rename = "Chemist_Warehouse", default)]
    chemist_warehouse: BTreeMap<String, String>,
    #[serde(rename = "Woolworths", default)]
    woolworths: BTreeMap<String, String>,
}

/// Load the watchlist and flatten it into the scan order: Chemist Warehouse
/// entries first, then Woolworths, keys in stable (sorted) order.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<WatchEntry>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        AppError::Watchlist(format!("cannot read {}: {e}", path.display()))
    })?;
    let doc: WatchlistDoc = serde_json::from_str(&raw)?;
    Ok(flatten(doc))
}

fn flatten(doc: WatchlistDoc) -> Vec<WatchEntry> {
    let mut entries = Vec::new();
    for (reference_name, product_id) in doc.chemist_warehouse {
        entries.push(WatchEntry {
            retailer: Retailer::ChemistWarehouse,
            reference_name,
            product_id,
        });
    }
    for (reference_name, product_id) in doc.woolworths {
        entries.push(WatchEntry {
            retailer: Retailer::Woolworths,
            reference_name,
            product_id,
        });
    }
    entries
}
