//! The aggregate header model and the summary row set.

use super::antispam::AntiSpamReport;
use super::entry::{HeaderEntry, OtherHeader};
use super::hop::HopRecord;

/// Static declaration of one summary row.
#[derive(Debug, Clone, Copy)]
pub struct SummarySpec {
    /// Header name this row is fed from (matched case-insensitively).
    pub header: &'static str,
    /// Human-readable label for display.
    pub label: &'static str,
}

/// Headers lifted into the summary section, display order.
pub const SUMMARY_ROWS: &[SummarySpec] = &[
    SummarySpec {
        header: "Subject",
        label: "Subject",
    },
    SummarySpec {
        header: "Message-ID",
        label: "Message ID",
    },
    SummarySpec {
        header: "Archived-At",
        label: "Archived at",
    },
    SummarySpec {
        header: "Date",
        label: "Creation time",
    },
    SummarySpec {
        header: "From",
        label: "From",
    },
    SummarySpec {
        header: "Reply-To",
        label: "Reply to",
    },
    SummarySpec {
        header: "To",
        label: "To",
    },
    SummarySpec {
        header: "Cc",
        label: "Cc",
    },
];

/// One populated summary row.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SummaryField {
    /// Header name the row was fed from.
    pub header: String,
    /// Display label.
    pub label: String,
    /// Decoded value; empty when the header was absent.
    pub value: String,
}

/// The finished analysis of one raw header block.
///
/// Built in a single parse pass by [`crate::parser::analyze::analyze`];
/// immutable afterwards. Collection orders are deterministic: `entries`
/// follows the source block, `hops` is chronological, `summary` and report
/// fields follow their declaration order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HeaderModel {
    /// Every unfolded header entry, in order of appearance.
    pub entries: Vec<HeaderEntry>,
    /// Summary rows in declaration order; value empty when the header was absent.
    pub summary: Vec<SummaryField>,
    /// Relay trace, oldest hop first, delays computed.
    pub hops: Vec<HopRecord>,
    /// Total elapsed time across the trace. `None` when fewer than two hops
    /// carried a usable timestamp — distinct from a genuine `"0 seconds"`.
    pub total_delay: Option<String>,
    /// Parsed `X-Microsoft-Antispam` report.
    pub microsoft_report: AntiSpamReport,
    /// Parsed `X-Forefront-Antispam-Report` report.
    pub forefront_report: AntiSpamReport,
    /// Entries not consumed by summary, trace, or antispam sections.
    pub other: Vec<OtherHeader>,
}

impl HeaderModel {
    /// Value of a summary row by header name, or `""`.
    pub fn summary_value(&self, header: &str) -> &str {
        self.summary
            .iter()
            .find(|row| row.header.eq_ignore_ascii_case(header))
            .map(|row| row.value.as_str())
            .unwrap_or("")
    }
}
