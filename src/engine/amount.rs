//! Amount extraction from price elements.
//!
//! Extraction runs a fixed fallback chain: machine-readable attributes
//! first, visible text last. Each candidate goes through the same
//! text-to-number parser, which handles both `1,234.56` and `1.234,56`
//! conventions by treating whichever separator occurs last as the decimal
//! point.

use scraper::ElementRef;

/// Attributes tried before text content, in order. `content` covers
/// structured-data markup (itemprop/microdata).
pub const VALUE_ATTRIBUTES: &[&str] = &["data-value", "data-raw-value", "data-price", "content"];

/// Parses a human-rendered amount out of arbitrary text.
///
/// Strips everything that is not an ASCII digit, comma, or period, then
/// normalizes separators: when both are present the last one wins as the
/// decimal separator and the other is dropped as grouping; a lone comma is a
/// decimal separator. Returns `None` for digit-free or unparseable input.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String =
        raw.chars().filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.').collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(comma), Some(period)) if comma > period => {
            cleaned.replace('.', "").replacen(',', ".", 1)
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) => cleaned.replacen(',', ".", 1),
        _ => cleaned,
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extracts a positive amount from a price element via the fallback chain.
///
/// A candidate that is missing, unparseable, or zero does not stop the
/// chain; a later candidate may still carry the real value. Returns `None`
/// when no candidate yields a positive amount, in which case the element is
/// simply not enhanced.
pub fn extract_amount(element: ElementRef) -> Option<f64> {
    for attr in VALUE_ATTRIBUTES {
        if let Some(value) = element.value().attr(attr).and_then(parse_positive) {
            return Some(value);
        }
    }

    let text: String = element.text().collect();
    parse_positive(&text)
}

fn parse_positive(raw: &str) -> Option<f64> {
    parse_amount(raw).filter(|v| *v > 0.0)
}
