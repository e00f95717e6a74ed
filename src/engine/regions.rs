//! The data-driven page region table.
//!
//! One entry per page region: name, gating flag, container selector, and
//! the union of candidate price selectors. The scan engine iterates this
//! table uniformly; region order carries no observable difference.

use crate::engine::selectors;
use crate::engine::settings::RegionFlag;
use scraper::Selector;
use std::sync::LazyLock;

/// A named page region with its selectors and gating flag.
pub struct RegionSpec {
    /// Region name, for logging
    pub name: &'static str,
    /// The configuration flag that gates this region
    pub flag: RegionFlag,
    container: &'static LazyLock<Selector>,
    candidates: &'static LazyLock<Selector>,
}

impl RegionSpec {
    /// Selector locating this region's container(s).
    pub fn container(&self) -> &Selector {
        self.container
    }

    /// Union selector for candidate price elements within a container.
    pub fn candidates(&self) -> &Selector {
        self.candidates
    }
}

/// All scannable regions.
pub static REGIONS: &[RegionSpec] = &[
    RegionSpec {
        name: "product-prices",
        flag: RegionFlag::Product,
        container: &selectors::product::CONTAINER,
        candidates: &selectors::product::PRICES,
    },
    RegionSpec {
        name: "cart-prices",
        flag: RegionFlag::Cart,
        container: &selectors::cart::CONTAINER,
        candidates: &selectors::cart::PRICES,
    },
    RegionSpec {
        name: "cart-modal",
        flag: RegionFlag::Cart,
        container: &selectors::cart_modal::CONTAINER,
        candidates: &selectors::cart_modal::PRICES,
    },
    RegionSpec {
        name: "order-confirmation",
        flag: RegionFlag::Cart,
        container: &selectors::order_confirmation::CONTAINER,
        candidates: &selectors::order_confirmation::PRICES,
    },
    RegionSpec {
        name: "checkout-summary",
        flag: RegionFlag::Cart,
        container: &selectors::checkout::CONTAINER,
        candidates: &selectors::checkout::PRICES,
    },
    RegionSpec {
        name: "header-minicart",
        flag: RegionFlag::Cart,
        container: &selectors::minicart::CONTAINER,
        candidates: &selectors::minicart::PRICES,
    },
];
