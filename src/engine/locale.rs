//! Number formatting locales derived from the document language.

use scraper::Html;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error for unrecognized locale names on the CLI.
#[derive(Debug, Error)]
#[error("unknown locale: {0}. Use: en, bg, de, fr")]
pub struct ParseLocaleError(String);

/// Grouping and decimal conventions keyed by the host page's declared
/// language. Unknown languages fall back to [`Locale::En`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    #[default]
    En,
    Bg,
    De,
    Fr,
}

impl Locale {
    /// Separator inserted between three-digit groups.
    pub fn group_separator(&self) -> char {
        match self {
            Locale::En => ',',
            Locale::Bg | Locale::Fr => ' ',
            Locale::De => '.',
        }
    }

    /// Decimal separator.
    pub fn decimal_separator(&self) -> char {
        match self {
            Locale::En => '.',
            Locale::Bg | Locale::De | Locale::Fr => ',',
        }
    }

    /// Resolves a locale from a language tag, matching the primary subtag
    /// only ("bg-BG" and "bg" are the same locale).
    pub fn from_lang(lang: &str) -> Self {
        let primary = lang.split(['-', '_']).next().unwrap_or("");
        primary.parse().unwrap_or_default()
    }

    /// Reads the locale from the document's `<html lang>` attribute,
    /// defaulting to English when absent or unrecognized.
    pub fn from_document(document: &Html) -> Self {
        document
            .root_element()
            .value()
            .attr("lang")
            .map(Self::from_lang)
            .unwrap_or_default()
    }

    /// Returns all supported locales.
    pub fn all() -> &'static [Locale] {
        &[Locale::En, Locale::Bg, Locale::De, Locale::Fr]
    }
}

impl FromStr for Locale {
    type Err = ParseLocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "bg" => Ok(Locale::Bg),
            "de" => Ok(Locale::De),
            "fr" => Ok(Locale::Fr),
            _ => Err(ParseLocaleError(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Locale::En => "en",
            Locale::Bg => "bg",
            Locale::De => "de",
            Locale::Fr => "fr",
        };
        write!(f, "{}", code)
    }
}
