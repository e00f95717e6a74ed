//! CSS selectors for storefront price regions.
//!
//! This file contains all selectors the scan engine queries. Update this
//! file when the host theme changes its markup: adding or adjusting a
//! region is a data change, not a code change.

use scraper::Selector;
use std::sync::LazyLock;

/// Class marking an injected secondary label. The sole contract other code
/// may rely on to detect an already-enhanced price.
pub const MARKER_CLASS: &str = "dualprice-label";

/// Additional class on pipe-style labels, for styling only.
pub const PIPE_MODIFIER_CLASS: &str = "dualprice-label--pipe";

/// Matches injected secondary labels.
pub static MARKER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".dualprice-label").unwrap());

/// Selectors for product listings and product pages.
pub mod product {
    use super::*;

    /// Product price region roots.
    pub static CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".product-prices, \
             .product-miniature, \
             .products",
        )
        .unwrap()
    });

    /// Candidate price elements within a product container.
    pub static PRICES: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".current-price span[itemprop='price'], \
             .current-price span, \
             .product-price, \
             .price",
        )
        .unwrap()
    });
}

/// Selectors for the cart page.
pub mod cart {
    use super::*;

    /// Cart line items and totals block.
    pub static CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".cart-items, \
             .cart-overview, \
             .cart-summary",
        )
        .unwrap()
    });

    /// Candidate price elements within the cart.
    pub static PRICES: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".product-price, \
             .cart-total .value, \
             .cart-total .price, \
             .price",
        )
        .unwrap()
    });
}

/// Selectors for the add-to-cart confirmation modal.
pub mod cart_modal {
    use super::*;

    /// The blockcart modal root.
    pub static CONTAINER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse("#blockcart-modal").unwrap());

    /// Candidate price elements within the modal.
    pub static PRICES: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".product-price, \
             .cart-content .value, \
             .price",
        )
        .unwrap()
    });
}

/// Selectors for the order confirmation page.
pub mod order_confirmation {
    use super::*;

    /// Order confirmation root.
    pub static CONTAINER: LazyLock<Selector> =
        LazyLock::new(|| Selector::parse(".order-confirmation").unwrap());

    /// Candidate total elements within the confirmation table.
    pub static PRICES: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".order-confirmation-table .value, \
             .total-value, \
             .value",
        )
        .unwrap()
    });
}

/// Selectors for the checkout summary sidebar.
pub mod checkout {
    use super::*;

    /// Checkout process root.
    pub static CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "#checkout, \
             .checkout-summary",
        )
        .unwrap()
    });

    /// Candidate summary totals within checkout.
    pub static PRICES: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".cart-summary .value, \
             .cart-total .value, \
             .price",
        )
        .unwrap()
    });
}

/// Selectors for the header mini-cart.
pub mod minicart {
    use super::*;

    /// Header cart block.
    pub static CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            "#_desktop_cart, \
             .blockcart",
        )
        .unwrap()
    });

    /// Candidate totals within the mini-cart.
    pub static PRICES: LazyLock<Selector> = LazyLock::new(|| {
        Selector::parse(
            ".cart-total .value, \
             .price",
        )
        .unwrap()
    });
}
