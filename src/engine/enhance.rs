//! The price enhancement scan engine.
//!
//! A scan is a pure function of (document state, settings snapshot). It runs
//! in two passes: an immutable collect pass that walks the region table and
//! decides which elements get a label, then a graft pass that appends the
//! label nodes, re-checking the idempotency guard per target so the pass
//! split is not observable. Every per-element failure is absorbed; the worst
//! outcome of a scan is that nothing changes.

use crate::engine::amount::extract_amount;
use crate::engine::format::{format_tagged, label_text};
use crate::engine::locale::Locale;
use crate::engine::regions::{RegionSpec, REGIONS};
use crate::engine::selectors::{MARKER, MARKER_CLASS, PIPE_MODIFIER_CLASS};
use crate::engine::settings::{SeparatorStyle, Snapshot};
use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, trace};

/// Counters from one full scan, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Regions whose flag was enabled and container was present
    pub regions_scanned: usize,
    /// Candidate elements examined
    pub elements_examined: usize,
    /// Labels actually appended
    pub labels_inserted: usize,
}

/// Runs full scans against a document for one settings snapshot.
pub struct Enhancer<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> Enhancer<'a> {
    /// Creates an enhancer over a resolved snapshot.
    pub fn new(snapshot: &'a Snapshot) -> Self {
        Self { snapshot }
    }

    /// Scans every enabled region and appends at most one secondary label
    /// per eligible price element.
    pub fn run_full_scan(&self, document: &mut Html) -> ScanReport {
        let mut report = ScanReport::default();

        if !self.snapshot.show_secondary {
            debug!("Secondary display switched off; skipping scan");
            return report;
        }
        if !self.snapshot.conversion_available() {
            debug!("No usable conversion rate; skipping scan");
            return report;
        }

        let locale = Locale::from_document(document);
        trace!("Scanning with locale {}", locale);

        let mut claimed: HashSet<NodeId> = HashSet::new();
        let mut pending: Vec<(NodeId, String)> = Vec::new();

        for region in REGIONS {
            if !self.snapshot.region_enabled(region.flag) {
                trace!("Region {} disabled by configuration", region.name);
                continue;
            }
            self.collect_region(document, region, locale, &mut claimed, &mut pending, &mut report);
        }

        for (target, markup) in &pending {
            // Re-check the guard against labels grafted earlier in this
            // scan: sibling renditions of one logical price collapse to a
            // single label, same as inserting synchronously would.
            let eligible = document
                .tree
                .get(*target)
                .and_then(ElementRef::wrap)
                .is_some_and(|element| !already_labeled(element));
            if !eligible {
                trace!("Label target suppressed by a sibling inserted this scan");
                continue;
            }
            append_fragment(document, *target, markup);
            report.labels_inserted += 1;
        }

        debug!(
            "Scan complete: {} regions, {} elements, {} labels inserted",
            report.regions_scanned, report.elements_examined, report.labels_inserted
        );
        report
    }

    /// Collect pass over one region: finds eligible elements and builds
    /// their label markup without touching the tree.
    fn collect_region(
        &self,
        document: &Html,
        region: &RegionSpec,
        locale: Locale,
        claimed: &mut HashSet<NodeId>,
        pending: &mut Vec<(NodeId, String)>,
        report: &mut ScanReport,
    ) {
        let mut containers = document.select(region.container()).peekable();
        if containers.peek().is_none() {
            // Host page does not have this region; not an error
            trace!("Region {} absent from document", region.name);
            return;
        }
        report.regions_scanned += 1;

        for container in containers {
            for element in container.select(region.candidates()) {
                report.elements_examined += 1;

                if !claimed.insert(element.id()) {
                    // Already claimed by an overlapping selector this scan
                    continue;
                }
                if already_labeled(element) {
                    continue;
                }
                if let Some(markup) = self.label_markup(element, locale) {
                    trace!("Labeling element in region {}", region.name);
                    pending.push((element.id(), markup));
                }
            }
        }
    }

    /// Extracts, converts, and formats one element's label markup. `None`
    /// means the element stays untouched.
    fn label_markup(&self, element: ElementRef, locale: Locale) -> Option<String> {
        let amount = extract_amount(element)?;
        let secondary = self.snapshot.convert(amount)?;
        let tagged = format_tagged(secondary, self.snapshot.secondary_code(), self.snapshot, locale);
        let text = label_text(&tagged, self.snapshot.separator);

        let classes = match self.snapshot.separator {
            SeparatorStyle::Paren => MARKER_CLASS.to_string(),
            SeparatorStyle::Pipe => format!("{} {}", MARKER_CLASS, PIPE_MODIFIER_CLASS),
        };
        Some(format!(r#"<span class="{}">{}</span>"#, classes, escape_text(&text)))
    }
}

/// The tri-fold idempotency guard: the element already holds a label, its
/// next sibling element is a label, or anything under its parent is a label.
/// Deliberately conservative so different selector passes reaching the same
/// logical price through different paths cannot double-insert.
fn already_labeled(element: ElementRef) -> bool {
    if element.select(&MARKER).next().is_some() {
        return true;
    }
    if let Some(next) = element.next_siblings().find_map(ElementRef::wrap) {
        if has_marker_class(next) {
            return true;
        }
    }
    if let Some(parent) = element.parent().and_then(ElementRef::wrap) {
        if parent.select(&MARKER).next().is_some() {
            return true;
        }
    }
    false
}

fn has_marker_class(element: ElementRef) -> bool {
    element.value().classes().any(|c| c == MARKER_CLASS)
}

/// Appends parsed fragment markup as the last children of `target`.
///
/// The fragment is parsed standalone and its nodes are copied into the
/// document tree breadth-first, which preserves sibling order under each
/// copied parent.
fn append_fragment(document: &mut Html, target: NodeId, markup: &str) {
    let fragment = Html::parse_fragment(markup);

    // parse_fragment wraps content in a synthetic <html> element
    let Some(root) = fragment.tree.root().children().find_map(ElementRef::wrap) else {
        return;
    };

    let mut queue: VecDeque<(NodeId, NodeId)> =
        root.children().map(|child| (child.id(), target)).collect();

    while let Some((source_id, parent_id)) = queue.pop_front() {
        let Some(source) = fragment.tree.get(source_id) else {
            continue;
        };
        let Some(mut parent) = document.tree.get_mut(parent_id) else {
            continue;
        };
        let new_id = parent.append(source.value().clone()).id();
        for child in source.children() {
            queue.push_back((child.id(), new_id));
        }
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
