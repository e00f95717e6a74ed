//! Immutable settings snapshot resolved from host configuration.

use crate::config::Config;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Built-in symbol table for the known currency pair.
pub const DEFAULT_SYMBOLS: &[(&str, &str)] = &[("BGN", "лв"), ("EUR", "€")];

/// Currencies whose symbol precedes the number. Everything else gets the
/// symbol appended after a space. Placement is a per-currency convention,
/// not a locale rule.
pub const SYMBOL_PREFIX_CODES: &[&str] = &["EUR"];

/// How the secondary amount is tagged with its currency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagStyle {
    /// Currency symbol (€ / лв)
    #[default]
    Symbol,
    /// ISO code (EUR / BGN)
    Code,
}

/// How the label is separated from the primary price.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeparatorStyle {
    /// Primary (Secondary)
    #[default]
    Paren,
    /// Primary | Secondary
    Pipe,
}

/// Error for unrecognized style names on the CLI.
#[derive(Debug, Error)]
#[error("unknown style: {0}. Use: {1}")]
pub struct ParseStyleError(String, &'static str);

impl FromStr for TagStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "symbol" => Ok(TagStyle::Symbol),
            "code" => Ok(TagStyle::Code),
            _ => Err(ParseStyleError(s.to_string(), "symbol, code")),
        }
    }
}

impl fmt::Display for TagStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagStyle::Symbol => write!(f, "symbol"),
            TagStyle::Code => write!(f, "code"),
        }
    }
}

impl FromStr for SeparatorStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "paren" => Ok(SeparatorStyle::Paren),
            "pipe" => Ok(SeparatorStyle::Pipe),
            _ => Err(ParseStyleError(s.to_string(), "paren, pipe")),
        }
    }
}

impl fmt::Display for SeparatorStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeparatorStyle::Paren => write!(f, "paren"),
            SeparatorStyle::Pipe => write!(f, "pipe"),
        }
    }
}

/// Gating flag a page region is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionFlag {
    /// Product listings and product pages
    Product,
    /// Cart, checkout, order confirmation, mini-cart
    Cart,
}

/// Immutable settings snapshot, constructed once per scan and threaded as an
/// explicit argument through the engine.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Primary currency code
    pub primary: String,
    /// Fixed conversion rate; 0.0 means conversion unavailable
    pub rate: f64,
    /// Master switch
    pub show_secondary: bool,
    /// Label tag style
    pub tag_style: TagStyle,
    /// Label separator style
    pub separator: SeparatorStyle,
    /// Product regions enabled
    pub enable_product: bool,
    /// Cart regions enabled
    pub enable_cart: bool,
    /// Email variable augmentation enabled
    pub enable_emails: bool,
    /// Currency code to display symbol
    symbols: HashMap<String, String>,
    /// Currency code to ISO code
    codes: HashMap<String, String>,
    /// The currency pair; the first member is the "divide" currency
    pair: (String, String),
}

impl Snapshot {
    /// Resolves a snapshot from raw host configuration.
    ///
    /// Never fails: malformed values are coerced into a snapshot that makes
    /// the engine no-op. A non-finite or non-positive rate resolves to 0.0,
    /// which disables conversion for the scan.
    pub fn resolve(config: &Config) -> Self {
        let rate = if config.rate.is_finite() && config.rate > 0.0 { config.rate } else { 0.0 };
        if rate == 0.0 && config.show_secondary {
            debug!("Conversion rate absent or non-positive; secondary display disabled");
        }

        let mut symbols: HashMap<String, String> =
            DEFAULT_SYMBOLS.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        symbols.extend(config.symbols.iter().map(|(k, v)| (k.clone(), v.clone())));

        let mut codes: HashMap<String, String> =
            DEFAULT_SYMBOLS.iter().map(|(k, _)| (k.to_string(), k.to_string())).collect();
        codes.extend(config.codes.iter().map(|(k, v)| (k.clone(), v.clone())));

        Self {
            primary: config.primary.clone(),
            rate,
            show_secondary: config.show_secondary,
            tag_style: config.tag_style,
            separator: config.separator,
            enable_product: config.enable_product,
            enable_cart: config.enable_cart,
            enable_emails: config.enable_emails,
            symbols,
            codes,
            pair: ("BGN".to_string(), "EUR".to_string()),
        }
    }

    /// Returns true if a usable conversion rate is configured.
    pub fn conversion_available(&self) -> bool {
        self.rate > 0.0
    }

    /// Returns the secondary currency code: the pair complement of the
    /// primary. A primary outside the pair gets the divide member.
    pub fn secondary_code(&self) -> &str {
        if self.primary == self.pair.0 {
            &self.pair.1
        } else {
            &self.pair.0
        }
    }

    /// Converts a primary amount to the secondary currency.
    ///
    /// Returns `None` when the rate is unusable or the amount is not a
    /// positive number; callers skip the label in that case.
    pub fn convert(&self, amount: f64) -> Option<f64> {
        if self.rate <= 0.0 || amount <= 0.0 {
            return None;
        }
        if self.primary == self.pair.0 {
            Some(amount / self.rate)
        } else {
            Some(amount * self.rate)
        }
    }

    /// Returns true when the region bound to `flag` should be scanned.
    pub fn region_enabled(&self, flag: RegionFlag) -> bool {
        match flag {
            RegionFlag::Product => self.enable_product,
            RegionFlag::Cart => self.enable_cart,
        }
    }

    /// Display symbol for a currency code, falling back to the code itself.
    pub fn symbol_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.symbols.get(code).map(String::as_str).unwrap_or(code)
    }

    /// ISO code string for a currency code, falling back to the code itself.
    pub fn code_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.codes.get(code).map(String::as_str).unwrap_or(code)
    }
}

/// Returns true if the currency's symbol is written before the number.
pub fn symbol_precedes(code: &str) -> bool {
    SYMBOL_PREFIX_CODES.contains(&code)
}
