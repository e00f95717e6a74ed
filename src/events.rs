//! Host trigger handling: one full scan per qualifying UI event.

use crate::config::Config;
use crate::engine::{Enhancer, ScanReport, Snapshot};
use scraper::Html;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::info;

/// A host-emitted event that qualifies for a full rescan. The host's event
/// model is strictly sequential; scans never overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Initial page readiness
    PageReady,
    /// Cart contents changed
    CartUpdated,
    /// Product selection or variant changed
    ProductUpdated,
}

/// Error for unrecognized trigger names on the CLI.
#[derive(Debug, Error)]
#[error("unknown event: {0}. Use: page-ready, cart-updated, product-updated")]
pub struct ParseTriggerError(String);

impl FromStr for Trigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "page-ready" => Ok(Trigger::PageReady),
            "cart-updated" => Ok(Trigger::CartUpdated),
            "product-updated" => Ok(Trigger::ProductUpdated),
            _ => Err(ParseTriggerError(s.to_string())),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trigger::PageReady => "page-ready",
            Trigger::CartUpdated => "cart-updated",
            Trigger::ProductUpdated => "product-updated",
        };
        write!(f, "{}", name)
    }
}

/// Owns one document and the host configuration across triggers.
///
/// Each handled trigger resolves a fresh snapshot and runs one scan to
/// completion, so configuration changes between events take effect on the
/// next scan and idempotency guards make rapid successive events safe.
pub struct Session {
    config: Config,
    document: Html,
}

impl Session {
    /// Creates a session over a parsed document.
    pub fn new(config: Config, html: &str) -> Self {
        Self { config, document: Html::parse_document(html) }
    }

    /// Handles one trigger: resolves a snapshot and runs a full scan.
    pub fn handle(&mut self, trigger: Trigger) -> ScanReport {
        info!("Handling {} event", trigger);
        let snapshot = Snapshot::resolve(&self.config);
        Enhancer::new(&snapshot).run_full_scan(&mut self.document)
    }

    /// Replaces the document, modeling the host re-rendering markup between
    /// events. Labels already present in the new markup are honored by the
    /// idempotency guards.
    pub fn replace_document(&mut self, html: &str) {
        self.document = Html::parse_document(html);
    }

    /// Serializes the current document state.
    pub fn html(&self) -> String {
        self.document.html()
    }

    /// Read access to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::selectors::MARKER;

    fn session() -> Session {
        let config = Config {
            primary: "BGN".to_string(),
            rate: 1.95583,
            show_secondary: true,
            enable_product: true,
            enable_cart: true,
            ..Config::default()
        };
        Session::new(
            config,
            r#"<html lang="en"><body><div class="product-prices">
                <div class="current-price"><span class="price">19.55 лв</span></div>
            </div></body></html>"#,
        )
    }

    #[test]
    fn test_trigger_parsing() {
        assert_eq!("page-ready".parse::<Trigger>().unwrap(), Trigger::PageReady);
        assert_eq!("CART-UPDATED".parse::<Trigger>().unwrap(), Trigger::CartUpdated);
        assert_eq!("product-updated".parse::<Trigger>().unwrap(), Trigger::ProductUpdated);

        let err = "resize".parse::<Trigger>().unwrap_err();
        assert!(err.to_string().contains("unknown event"));
    }

    #[test]
    fn test_trigger_display_roundtrip() {
        for trigger in [Trigger::PageReady, Trigger::CartUpdated, Trigger::ProductUpdated] {
            assert_eq!(trigger.to_string().parse::<Trigger>().unwrap(), trigger);
        }
    }

    #[test]
    fn test_session_scan_on_trigger() {
        let mut session = session();
        let report = session.handle(Trigger::PageReady);
        assert_eq!(report.labels_inserted, 1);
        assert!(session.html().contains("dualprice-label"));
    }

    #[test]
    fn test_rapid_successive_events_stay_idempotent() {
        let mut session = session();
        session.handle(Trigger::PageReady);
        session.handle(Trigger::CartUpdated);
        session.handle(Trigger::ProductUpdated);

        let document = Html::parse_document(&session.html());
        assert_eq!(document.select(&MARKER).count(), 1);
    }

    #[test]
    fn test_replace_document_rescans_fresh_markup() {
        let mut session = session();
        session.handle(Trigger::PageReady);

        // Host re-rendered the region without our label
        session.replace_document(
            r#"<html lang="en"><body><div class="product-prices">
                <div class="current-price"><span class="price">39.12 лв</span></div>
            </div></body></html>"#,
        );
        let report = session.handle(Trigger::CartUpdated);
        assert_eq!(report.labels_inserted, 1);
        assert!(session.html().contains("(€20.00)"));
    }
}
