use scraper::Html;

use super::{parse_currency, text_of, ExtractError};
use crate::types::{ProductQuote, RefOutcome, RefPrice};

/// Chemist Warehouse renders server-side: the product name sits in an
/// `itemprop="name"` block and the current price in `span.product__price`.
/// Discounted items carry a `div.Savings` element holding the absolute
/// amount saved ("SAVE $3.50"); full-price items have no such element.
pub(super) fn extract(html: &str) -> Result<ProductQuote, ExtractError> {
    let doc = Html::parse_document(html);

    let name = text_of(&doc, r#"div[itemprop="name"]"#)
        .ok_or(ExtractError::MissingElement("product name"))?;
    let price_text = text_of(&doc, "span.product__price")
        .ok_or(ExtractError::MissingElement("current price"))?;
    let price =
        parse_currency(&price_text).ok_or_else(|| ExtractError::BadPrice(price_text.clone()))?;

    let reference = match text_of(&doc, "div.Savings") {
        None => RefOutcome::Absent,
        Some(text) => match parse_currency(&text) {
            Some(savings) => RefOutcome::Present(RefPrice::Savings(savings)),
            None => RefOutcome::Unparseable(text),
        },
    };

    Ok(ProductQuote { name, price, reference })
}
