//! Secondary amount rendering and label text assembly.

use crate::engine::locale::Locale;
use crate::engine::settings::{symbol_precedes, SeparatorStyle, Snapshot, TagStyle};

/// Renders an amount with exactly two fractional digits and locale-aware
/// digit grouping. Amounts are non-negative by the engine's contract.
pub fn format_amount(amount: f64, locale: Locale) -> String {
    let fixed = format!("{:.2}", amount);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let digits = int_part.as_bytes();
    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(locale.group_separator());
        }
        grouped.push(*digit as char);
    }

    format!("{}{}{}", grouped, locale.decimal_separator(), frac_part)
}

/// Formats a converted amount with its currency tag.
///
/// Tag style `code` appends the ISO code after a space. Tag style `symbol`
/// uses the per-currency placement table: prefixed currencies get the symbol
/// glued before the number, all others get it appended after a space.
pub fn format_tagged(amount: f64, code: &str, snapshot: &Snapshot, locale: Locale) -> String {
    let number = format_amount(amount, locale);
    match snapshot.tag_style {
        TagStyle::Code => format!("{} {}", number, snapshot.code_for(code)),
        TagStyle::Symbol => {
            let symbol = snapshot.symbol_for(code);
            if symbol_precedes(code) {
                format!("{}{}", symbol, number)
            } else {
                format!("{} {}", number, symbol)
            }
        }
    }
}

/// Wraps a tagged amount into the final label text.
pub fn label_text(tagged: &str, separator: SeparatorStyle) -> String {
    match separator {
        SeparatorStyle::Paren => format!("({})", tagged),
        SeparatorStyle::Pipe => format!("| {}", tagged),
    }
}
