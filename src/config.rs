//! Host configuration with TOML, environment variables, and CLI overrides.

use crate::engine::settings::{SeparatorStyle, TagStyle};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Raw host-provided configuration with layered loading.
///
/// Every field has a safe default; a missing or partial config file yields a
/// usable (possibly fully disabled) configuration. Validation happens later,
/// in [`Snapshot::resolve`](crate::engine::settings::Snapshot::resolve).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Primary currency ISO code (the currency the host renders natively)
    #[serde(default = "default_primary")]
    pub primary: String,

    /// Fixed conversion rate between the currency pair; <= 0 disables
    /// secondary display entirely
    #[serde(default)]
    pub rate: f64,

    /// Master switch for the secondary price display
    #[serde(default)]
    pub show_secondary: bool,

    /// Label tag style: currency symbol or ISO code
    #[serde(default)]
    pub tag_style: TagStyle,

    /// Label separator style: parenthesized or pipe-separated
    #[serde(default)]
    pub separator: SeparatorStyle,

    /// Enhance product listings and product pages
    #[serde(default)]
    pub enable_product: bool,

    /// Enhance cart, checkout, and order confirmation regions
    #[serde(default)]
    pub enable_cart: bool,

    /// Expose secondary totals to email templates
    #[serde(default)]
    pub enable_emails: bool,

    /// Currency code to display symbol overrides
    #[serde(default)]
    pub symbols: HashMap<String, String>,

    /// Currency code to ISO code overrides
    #[serde(default)]
    pub codes: HashMap<String, String>,
}

fn default_primary() -> String {
    "BGN".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            rate: 0.0,
            show_secondary: false,
            tag_style: TagStyle::Symbol,
            separator: SeparatorStyle::Paren,
            enable_product: false,
            enable_cart: false,
            enable_emails: false,
            symbols: HashMap::new(),
            codes: HashMap::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("dualprice.toml");
        if local_config.exists() {
            debug!("Found dualprice.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("dualprice").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(primary) = std::env::var("DUALPRICE_PRIMARY") {
            if !primary.is_empty() {
                self.primary = primary;
            }
        }

        if let Ok(rate) = std::env::var("DUALPRICE_RATE") {
            if let Ok(r) = rate.parse() {
                self.rate = r;
            }
        }

        if let Ok(show) = std::env::var("DUALPRICE_SHOW_SECONDARY") {
            if let Ok(s) = show.parse() {
                self.show_secondary = s;
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.primary, "BGN");
        assert_eq!(config.rate, 0.0);
        assert!(!config.show_secondary);
        assert_eq!(config.tag_style, TagStyle::Symbol);
        assert_eq!(config.separator, SeparatorStyle::Paren);
        assert!(!config.enable_product);
        assert!(!config.enable_cart);
        assert!(!config.enable_emails);
        assert!(config.symbols.is_empty());
        assert!(config.codes.is_empty());
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            primary = "EUR"
            rate = 1.95583
            show_secondary = true
            enable_product = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.primary, "EUR");
        assert_eq!(config.rate, 1.95583);
        assert!(config.show_secondary);
        assert!(config.enable_product);
        assert!(!config.enable_cart);
    }

    #[test]
    fn test_config_from_toml_all_fields() {
        let toml = r#"
            primary = "BGN"
            rate = 1.95583
            show_secondary = true
            tag_style = "code"
            separator = "pipe"
            enable_product = true
            enable_cart = true
            enable_emails = true

            [symbols]
            BGN = "lv"

            [codes]
            BGN = "BGN"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.tag_style, TagStyle::Code);
        assert_eq!(config.separator, SeparatorStyle::Pipe);
        assert!(config.enable_emails);
        assert_eq!(config.symbols.get("BGN").unwrap(), "lv");
        assert_eq!(config.codes.get("BGN").unwrap(), "BGN");
    }

    #[test]
    fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            primary = "EUR"
            rate = 0.51129
            "#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.primary, "EUR");
        assert_eq!(config.rate, 0.51129);
    }

    #[test]
    fn test_config_from_file_not_found() {
        let result = Config::from_file("/nonexistent/path/dualprice.toml");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_config_from_file_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml {{{{").unwrap();

        let result = Config::from_file(file.path());
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_config_with_env() {
        // Save original env vars
        let orig_primary = std::env::var("DUALPRICE_PRIMARY").ok();
        let orig_rate = std::env::var("DUALPRICE_RATE").ok();
        let orig_show = std::env::var("DUALPRICE_SHOW_SECONDARY").ok();

        std::env::set_var("DUALPRICE_PRIMARY", "EUR");
        std::env::set_var("DUALPRICE_RATE", "1.95583");
        std::env::set_var("DUALPRICE_SHOW_SECONDARY", "true");

        let config = Config::new().with_env();
        assert_eq!(config.primary, "EUR");
        assert_eq!(config.rate, 1.95583);
        assert!(config.show_secondary);

        // Invalid values are ignored, keeping what is already set
        std::env::set_var("DUALPRICE_RATE", "not_a_number");
        std::env::set_var("DUALPRICE_SHOW_SECONDARY", "maybe");
        let config = Config::new().with_env();
        assert_eq!(config.rate, 0.0);
        assert!(!config.show_secondary);

        // Restore original env vars
        match orig_primary {
            Some(v) => std::env::set_var("DUALPRICE_PRIMARY", v),
            None => std::env::remove_var("DUALPRICE_PRIMARY"),
        }
        match orig_rate {
            Some(v) => std::env::set_var("DUALPRICE_RATE", v),
            None => std::env::remove_var("DUALPRICE_RATE"),
        }
        match orig_show {
            Some(v) => std::env::set_var("DUALPRICE_SHOW_SECONDARY", v),
            None => std::env::remove_var("DUALPRICE_SHOW_SECONDARY"),
        }
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config {
            primary: "EUR".to_string(),
            rate: 1.95583,
            show_secondary: true,
            tag_style: TagStyle::Code,
            separator: SeparatorStyle::Pipe,
            enable_product: true,
            enable_cart: true,
            enable_emails: false,
            symbols: HashMap::new(),
            codes: HashMap::new(),
        };
        config.symbols.insert("EUR".to_string(), "€".to_string());

        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.primary, config.primary);
        assert_eq!(parsed.rate, config.rate);
        assert_eq!(parsed.tag_style, config.tag_style);
        assert_eq!(parsed.separator, config.separator);
        assert_eq!(parsed.symbols.get("EUR").unwrap(), "€");
    }
}
