use scraper::Html;

use super::{parse_decimal, text_of, ExtractError};
use crate::types::{ProductQuote, RefOutcome, RefPrice};

/// Price nodes appear only after the client-side render, so the fetcher
/// waits for this selector before handing over the page.
pub(super) const READY_SELECTOR: &str = ".price-dollars";

/// Woolworths splits the current price across two nodes (`.price-dollars`
/// and `.price-cents`) and marks discounts with a strikethrough `.price-was`
/// element carrying the pre-discount price.
pub(super) fn extract(html: &str) -> Result<ProductQuote, ExtractError> {
    let doc = Html::parse_document(html);

    let name = text_of(&doc, ".shelfProductTile-title")
        .ok_or(ExtractError::MissingElement("product title"))?;
    let dollars = text_of(&doc, ".price-dollars")
        .ok_or(ExtractError::MissingElement("price dollars"))?;
    let cents = text_of(&doc, ".price-cents")
        .ok_or(ExtractError::MissingElement("price cents"))?;

    let joined = format!("{}.{}", digits(&dollars), digits(&cents));
    let price: f64 = joined
        .parse()
        .map_err(|_| ExtractError::BadPrice(format!("{dollars}.{cents}")))?;

    let reference = match text_of(&doc, ".price-was") {
        None => RefOutcome::Absent,
        Some(text) => match parse_decimal(&text) {
            Some(was) => RefOutcome::Present(RefPrice::Was(was)),
            None => RefOutcome::Unparseable(text),
        },
    };

    Ok(ProductQuote { name, price, reference })
}

fn digits(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}
