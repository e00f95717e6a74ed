//! Secondary totals for email template variables.
//!
//! A parallel, simpler application of the conversion and formatting logic:
//! email variables already hold rendered primary totals, so this operates on
//! plain strings, entirely outside the document tree.

use crate::engine::amount::parse_amount;
use crate::engine::format::format_tagged;
use crate::engine::locale::Locale;
use crate::engine::settings::Snapshot;
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Order total variables replicated with a secondary equivalent.
pub const TOTAL_VARIABLES: &[&str] =
    &["total_paid", "total_products", "total_shipping", "total_tax", "total_discounts"];

/// Augments email template variables with secondary totals.
pub struct MailAugmenter<'a> {
    snapshot: &'a Snapshot,
    locale: Locale,
}

impl<'a> MailAugmenter<'a> {
    /// Creates an augmenter over a resolved snapshot.
    pub fn new(snapshot: &'a Snapshot, locale: Locale) -> Self {
        Self { snapshot, locale }
    }

    /// For each known total variable (`{TOTAL_PAID}` etc.) holding a string,
    /// parses the rendered amount and inserts `{<KEY>_SECONDARY}`. Returns
    /// the number of variables added. Gated by the master switch and the
    /// email flag; disabled augmentation is a no-op, not an error.
    pub fn augment(&self, vars: &mut Map<String, Value>) -> usize {
        if !self.snapshot.show_secondary || !self.snapshot.enable_emails {
            debug!("Email augmentation disabled by configuration");
            return 0;
        }
        if !self.snapshot.conversion_available() {
            debug!("No usable conversion rate; email variables unchanged");
            return 0;
        }

        let mut added = 0;
        for base in TOTAL_VARIABLES {
            let upper = base.to_uppercase();
            let key = format!("{{{}}}", upper);

            let Some(Value::String(raw)) = vars.get(&key) else {
                continue;
            };
            // Variables may carry markup around the rendered total
            let Some(amount) = parse_amount(&strip_tags(raw)).filter(|v| *v > 0.0) else {
                trace!("Variable {} holds no positive amount", key);
                continue;
            };
            let Some(secondary) = self.snapshot.convert(amount) else {
                continue;
            };

            let formatted =
                format_tagged(secondary, self.snapshot.secondary_code(), self.snapshot, self.locale);
            vars.insert(format!("{{{}_SECONDARY}}", upper), Value::String(formatted));
            added += 1;
        }

        debug!("Added {} secondary email variables", added);
        added
    }
}

/// Drops `<...>` markup, keeping only rendered text.
fn strip_tags(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
