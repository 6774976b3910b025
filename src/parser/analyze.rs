//! One-pass analysis: tokenize the raw block, dispatch each entry, then
//! compute the relay chronology.

use crate::model::antispam::AntiSpamReport;
use crate::model::entry::OtherHeader;
use crate::model::headers::{HeaderModel, SummaryField, SUMMARY_ROWS};
use crate::refs;

use super::{antispam, date, received, tokenizer};

/// Analyze a raw transport header block.
///
/// Every entry lands in `entries`; `Received`, the two antispam headers,
/// and the summary rows are additionally consumed by their sections, and
/// whatever remains goes to the `other` bucket with a reference URL when
/// the header name is well known. Empty input produces a well-formed empty
/// model, not an error.
pub fn analyze(raw: &str) -> HeaderModel {
    let entries = tokenizer::tokenize(raw);

    let mut summary: Vec<SummaryField> = SUMMARY_ROWS
        .iter()
        .map(|row| SummaryField {
            header: row.header.to_string(),
            label: row.label.to_string(),
            value: String::new(),
        })
        .collect();
    let mut hops = Vec::new();
    let mut microsoft = AntiSpamReport::microsoft();
    let mut forefront = AntiSpamReport::forefront();
    let mut other = Vec::new();

    for entry in &entries {
        if entry.is_named("Received") {
            hops.push(received::parse_hop(&entry.value));
        } else if entry.is_named("X-Microsoft-Antispam") {
            antispam::parse_report(&entry.value, &mut microsoft);
        } else if entry.is_named("X-Forefront-Antispam-Report") {
            antispam::parse_report(&entry.value, &mut forefront);
        } else if let Some(row) = summary
            .iter_mut()
            .find(|row| entry.is_named(&row.header))
        {
            // First occurrence wins; later duplicates stay in `entries`.
            if row.value.is_empty() {
                row.value = if row.header.eq_ignore_ascii_case("Date") {
                    date::parse_date(&entry.value)
                        .map(|dt| date::display_date(&dt))
                        .unwrap_or_else(|| entry.value.clone())
                } else {
                    entry.value.clone()
                };
            }
        } else {
            other.push(OtherHeader {
                number: other.len() + 1,
                name: entry.name.clone(),
                value: entry.value.clone(),
                url: refs::lookup(&entry.name),
            });
        }
    }

    let total_delay = received::compute_deltas(&mut hops);

    HeaderModel {
        entries,
        summary,
        hops,
        total_delay,
        microsoft_report: microsoft,
        forefront_report: forefront,
        other,
    }
}
