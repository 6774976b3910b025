//! Relay hop record parsed from a `Received:` header value.

/// One hop of the relay trace.
///
/// Field parsing is best-effort: a clause that was not present in the source
/// header is `None`, never an empty string. The computed fields (`hop`,
/// `delay`, `delay_sort`, `percent`) are filled by the delay engine after
/// the full trace has been reordered chronologically.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HopRecord {
    /// Sending host (`from` clause).
    pub from: Option<String>,
    /// Receiving host (`by` clause).
    pub by: Option<String>,
    /// Protocol (`with` clause).
    pub with: Option<String>,
    /// Queue/transaction id (`id` clause).
    pub id: Option<String>,
    /// Envelope recipient (`for` clause).
    pub r#for: Option<String>,
    /// Relay link (`via` clause).
    pub via: Option<String>,

    /// Locale-formatted display form of the hop timestamp.
    pub date: Option<String>,
    /// Hop timestamp in milliseconds since the Unix epoch.
    /// `None` when the date tail was missing or unparseable.
    pub date_num: Option<i64>,

    /// 1-based position after chronological ordering (0 until computed).
    pub hop: usize,
    /// Human-readable delay relative to the previous timed hop.
    pub delay: Option<String>,
    /// Raw millisecond delta behind `delay`. `-1` means this hop has no
    /// usable chronology anchor and must sort before any real delta.
    pub delay_sort: i64,
    /// Share of the total positive delay, 0–100. Stays 0 for negative
    /// (clock-skew) deltas, which remain flagged by their `delay_sort`.
    pub percent: f64,

    /// Original raw header value, kept for diagnostics.
    pub source_header: String,
}

impl Default for HopRecord {
    fn default() -> Self {
        Self {
            from: None,
            by: None,
            with: None,
            id: None,
            r#for: None,
            via: None,
            date: None,
            date_num: None,
            hop: 0,
            delay: None,
            delay_sort: -1,
            percent: 0.0,
            source_header: String::new(),
        }
    }
}

impl HopRecord {
    /// A degenerate record carrying only the sentinels and the raw source.
    pub fn empty(source: impl Into<String>) -> Self {
        Self {
            source_header: source.into(),
            ..Self::default()
        }
    }
}
