//! dualprice - dual-currency price display engine for storefront HTML
//!
//! Scans storefront markup for primary-currency prices and appends a
//! secondary-currency label next to each, using a fixed conversion rate.
//! Scans are idempotent, locale-aware, and safe to re-run on every host
//! UI update.

pub mod config;
pub mod engine;
pub mod events;
pub mod mail;

pub use config::Config;
pub use engine::{Enhancer, Locale, ScanReport, SeparatorStyle, Snapshot, TagStyle};
pub use events::{Session, Trigger};
pub use mail::MailAugmenter;
