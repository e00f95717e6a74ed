//! The price extraction, conversion, and formatting engine.

pub mod amount;
pub mod enhance;
pub mod format;
pub mod locale;
pub mod regions;
pub mod selectors;
pub mod settings;

pub use enhance::{Enhancer, ScanReport};
pub use locale::Locale;
pub use settings::{RegionFlag, SeparatorStyle, Snapshot, TagStyle};
