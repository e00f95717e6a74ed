//! Integration tests for the enhancement engine using a fixture page.

use dualprice::config::Config;
use dualprice::engine::selectors::MARKER;
use dualprice::engine::{Enhancer, Snapshot};
use dualprice::events::{Session, Trigger};
use scraper::{Html, Selector};

const STOREFRONT_FIXTURE: &str = include_str!("fixtures/storefront.html");

fn full_config() -> Config {
    Config {
        primary: "BGN".to_string(),
        rate: 1.95583,
        show_secondary: true,
        enable_product: true,
        enable_cart: true,
        ..Config::default()
    }
}

fn label_texts(document: &Html) -> Vec<String> {
    document.select(&MARKER).map(|e| e.text().collect()).collect()
}

#[test]
fn test_full_page_scan() {
    let snapshot = Snapshot::resolve(&full_config());
    let mut document = Html::parse_document(STOREFRONT_FIXTURE);

    let report = Enhancer::new(&snapshot).run_full_scan(&mut document);

    // Product listing, product page, two cart lines, cart total,
    // confirmation total, mini-cart total; the "Call for price" item and
    // the absent modal/checkout regions contribute nothing
    assert_eq!(report.labels_inserted, 7);
    assert_eq!(report.regions_scanned, 4);

    let labels = label_texts(&document);
    assert_eq!(labels.len(), 7);
    assert!(labels.contains(&"(€10.00)".to_string()));
    assert!(labels.contains(&"(€20.00)".to_string()));
    assert!(labels.contains(&"(€30.00)".to_string()));
    assert!(labels.contains(&"(€29.99)".to_string()));
}

#[test]
fn test_sibling_renditions_get_one_label_per_scan() {
    let snapshot = Snapshot::resolve(&full_config());
    let mut document = Html::parse_document(STOREFRONT_FIXTURE);

    Enhancer::new(&snapshot).run_full_scan(&mut document);

    // The product page block renders its price twice (machine-readable span
    // plus a plain sibling); one logical price gets exactly one label
    let product_labels = Selector::parse(".product-prices .dualprice-label").unwrap();
    assert_eq!(document.select(&product_labels).count(), 1);
}

#[test]
fn test_full_page_scan_is_idempotent() {
    let snapshot = Snapshot::resolve(&full_config());
    let mut document = Html::parse_document(STOREFRONT_FIXTURE);

    let enhancer = Enhancer::new(&snapshot);
    let first = enhancer.run_full_scan(&mut document);
    let second = enhancer.run_full_scan(&mut document);

    assert_eq!(first.labels_inserted, 7);
    assert_eq!(second.labels_inserted, 0);
    assert_eq!(label_texts(&document).len(), 7);

    // Round-tripping through serialization keeps the guards effective
    let mut reparsed = Html::parse_document(&document.html());
    let third = enhancer.run_full_scan(&mut reparsed);
    assert_eq!(third.labels_inserted, 0);
}

#[test]
fn test_product_flag_only() {
    let mut config = full_config();
    config.enable_cart = false;
    let snapshot = Snapshot::resolve(&config);
    let mut document = Html::parse_document(STOREFRONT_FIXTURE);

    let report = Enhancer::new(&snapshot).run_full_scan(&mut document);
    assert_eq!(report.labels_inserted, 2);
}

#[test]
fn test_cart_flag_only() {
    let mut config = full_config();
    config.enable_product = false;
    let snapshot = Snapshot::resolve(&config);
    let mut document = Html::parse_document(STOREFRONT_FIXTURE);

    let report = Enhancer::new(&snapshot).run_full_scan(&mut document);
    assert_eq!(report.labels_inserted, 5);
}

#[test]
fn test_disabled_rate_never_labels() {
    let mut config = full_config();
    config.rate = -2.5;
    let snapshot = Snapshot::resolve(&config);
    let mut document = Html::parse_document(STOREFRONT_FIXTURE);

    let report = Enhancer::new(&snapshot).run_full_scan(&mut document);
    assert_eq!(report.labels_inserted, 0);
    assert!(label_texts(&document).is_empty());
}

#[test]
fn test_session_event_replay() {
    let mut session = Session::new(full_config(), STOREFRONT_FIXTURE);

    let first = session.handle(Trigger::PageReady);
    assert_eq!(first.labels_inserted, 7);

    // Rapid successive host events must not duplicate labels
    for trigger in [Trigger::CartUpdated, Trigger::ProductUpdated, Trigger::CartUpdated] {
        let report = session.handle(trigger);
        assert_eq!(report.labels_inserted, 0);
    }

    let document = Html::parse_document(&session.html());
    assert_eq!(document.select(&MARKER).count(), 7);
}

#[test]
fn test_output_preserves_original_content() {
    let mut session = Session::new(full_config(), STOREFRONT_FIXTURE);
    session.handle(Trigger::PageReady);
    let html = session.html();

    // Appended labels never replace or reorder host content
    assert!(html.contains("19.55 лв"));
    assert!(html.contains("39.12 лв"));
    assert!(html.contains("Call for price"));
    assert!(html.contains("Example Shop"));
}
