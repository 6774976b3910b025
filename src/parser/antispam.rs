//! The semicolon-delimited `KEY:value;` antispam report microformat.
//!
//! One engine serves both Microsoft dialects — the field set passed in is
//! the only thing that differs between them. Unknown keys are never
//! dropped: they accumulate verbatim in the report's `unparsed` field.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;

use crate::model::antispam::{AntiSpamReport, SOURCE_KEY, UNPARSED_KEY};

/// One `KEY:value;` segment. Keys cannot contain `;` or `:`.
fn segment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([^;:]+):([^;]*);").unwrap())
}

fn semi_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r";{2,}").unwrap())
}

/// Parse a report into a declared field set.
///
/// Empty input is a no-op. Known keys are matched case-insensitively,
/// first match wins; everything else lands in `unparsed`. The raw report
/// is always recorded in `source` before any normalization.
pub fn parse_report(report: &str, fields: &mut AntiSpamReport) {
    if report.is_empty() {
        return;
    }

    if let Some(source) = fields.get_mut(SOURCE_KEY) {
        source.value = report.to_string();
    }

    // "(null)" is a vendor serialization artifact, not data.
    let mut text = report.replace("(null)", "");

    // Every segment, including the last, must end in exactly one ';' for
    // the extraction pattern to see it.
    if !text.ends_with(';') {
        text.push(';');
    }
    let text = semi_run_re().replace_all(&text, ";");

    let mut assigned: HashSet<String> = HashSet::new();
    let mut unparsed = String::new();

    for caps in segment_re().captures_iter(&text) {
        let key = caps[1].trim();
        let value = caps[2].trim();

        let known = fields
            .get(key)
            .map(|f| f.key != SOURCE_KEY && f.key != UNPARSED_KEY)
            .unwrap_or(false);

        if known {
            if assigned.insert(key.to_ascii_lowercase()) {
                if let Some(field) = fields.get_mut(key) {
                    field.value = value.to_string();
                }
            }
        } else {
            unparsed.push_str(&caps[0]);
        }
    }

    if let Some(field) = fields.get_mut(UNPARSED_KEY) {
        field.value = unparsed;
    }
}
