//! `Received:` relay trace parsing and the hop delay engine.
//!
//! There is no single grammar for Received headers — every MTA writes its
//! own dialect, some of them malformed on purpose. Parsing is an ordered
//! sequence of heuristic passes: date-tail extraction, named vendor
//! repairs, then a generic keyword/span tokenization over what is left.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::i18n;
use crate::model::hop::HopRecord;

use super::date;

/// Clause keywords recognized by the generic pass, in declaration order.
const FIELD_KEYWORDS: &[&str] = &["from", "by", "with", "id", "for", "via"];

/// Parse one `Received:` header value into a hop record.
///
/// Empty input is not an error: it yields the degenerate record carrying
/// only the sentinels and the raw source text.
pub fn parse_hop(value: &str) -> HopRecord {
    let mut hop = HopRecord::empty(value);
    if value.trim().is_empty() {
        return hop;
    }

    // Internal line breaks become single spaces, and the UTC marker gets
    // one canonical spelling before any other matching.
    let mut working = value.replace(['\r', '\n'], " ");
    working = utc_marker_re().replace_all(&working, "(UTC)").into_owned();

    working = extract_date_tail(working, &mut hop);

    // Vendor repairs claim their field before the generic pass, so a
    // matched clause is never double-assigned.
    let mut keywords: Vec<&str> = FIELD_KEYWORDS.to_vec();
    if let Some(by) = postfix_userid(&mut working) {
        debug!(rule = "postfix_userid", by = by.as_str(), "vendor repair fired");
        hop.by = Some(by);
        keywords.retain(|k| *k != "by");
    } else if let Some(by) = qmail_invoked(&mut working) {
        debug!(rule = "qmail_invoked", by = by.as_str(), "vendor repair fired");
        hop.by = Some(by);
        keywords.retain(|k| *k != "by");
    }

    assign_keyword_spans(&working, &keywords, &mut hop);

    hop
}

fn utc_marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\(\s*UTC\s*\)|\bUTC\b").unwrap())
}

/// Locate and consume the trailing date field.
///
/// The date normally sits after the last `;`. Headers that lost their
/// separator get a virtual one, placed before a day-of-week token or,
/// failing that, before a `YYYY-M-D` token. The tail is only removed from
/// the working string when it actually parses as a date.
fn extract_date_tail(working: String, hop: &mut HopRecord) -> String {
    let split = match working.rfind(';') {
        Some(pos) => Some((pos, pos + 1)),
        None => virtual_separator(&working).map(|pos| (pos, pos)),
    };
    let Some((head_end, tail_start)) = split else {
        return working;
    };

    match date::parse_date(&working[tail_start..]) {
        Some(dt) => {
            hop.date = Some(date::display_date(&dt));
            hop.date_num = Some(dt.timestamp_millis());
            working[..head_end].to_string()
        }
        None => working,
    }
}

/// Byte offset where a virtual `;` separator belongs, if a recognizable
/// date start exists.
fn virtual_separator(s: &str) -> Option<usize> {
    static DOW: OnceLock<Regex> = OnceLock::new();
    static YMD: OnceLock<Regex> = OnceLock::new();
    let dow = DOW.get_or_init(|| Regex::new(r"\b(Mon|Tue|Wed|Thu|Fri|Sat|Sun),?\s").unwrap());
    let ymd = YMD.get_or_init(|| Regex::new(r"\b\d{4}-\d{1,2}-\d{1,2}\b").unwrap());

    dow.find(s).or_else(|| ymd.find(s)).map(|m| m.start())
}

/// Repair rule: `by example.com (Postfix, from userid 1001)`.
///
/// The host and the Postfix comment belong together in `by`; left alone,
/// the generic pass would split them at the parenthesis. Returns the
/// captured `by` value and removes the matched span when the rule fires.
fn postfix_userid(working: &mut String) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(?i)\bby\s+(\S+\s+\(postfix, from userid \d+\))").unwrap()
    });

    let caps = re.captures(working)?;
    let by = caps.get(1).map(|m| m.as_str().to_string())?;
    let span = caps.get(0).map(|m| m.range())?;
    working.replace_range(span, " ");
    Some(by)
}

/// Repair rule: `(qmail 12345 invoked from network)`.
///
/// qmail records its identity as a bare comment with no `by` keyword at
/// all. Returns the comment body and removes the matched span.
fn qmail_invoked(working: &mut String) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)\((qmail \d+ invoked [^)]*)\)").unwrap());

    let caps = re.captures(working)?;
    let by = caps.get(1).map(|m| m.as_str().to_string())?;
    let span = caps.get(0).map(|m| m.range())?;
    working.replace_range(span, " ");
    Some(by)
}

/// Generic clause pass: every occurrence of every remaining keyword marks a
/// span boundary; spans run between consecutive keyword tokens. A keyword
/// seen more than once gets its spans joined with `"; "` in token order.
fn assign_keyword_spans(working: &str, keywords: &[&str], hop: &mut HopRecord) {
    let tokens: Vec<&str> = working.split_whitespace().collect();

    let mut matches: Vec<(usize, &str)> = Vec::new();
    for &keyword in keywords {
        for (idx, token) in tokens.iter().enumerate() {
            if token.eq_ignore_ascii_case(keyword) {
                matches.push((idx, keyword));
            }
        }
    }
    matches.sort_by_key(|&(idx, _)| idx);

    for (i, &(idx, keyword)) in matches.iter().enumerate() {
        let end = matches
            .get(i + 1)
            .map(|&(next, _)| next)
            .unwrap_or(tokens.len());
        let span = tokens[idx + 1..end].join(" ");

        let slot = match keyword {
            "from" => &mut hop.from,
            "by" => &mut hop.by,
            "with" => &mut hop.with,
            "id" => &mut hop.id,
            "for" => &mut hop.r#for,
            "via" => &mut hop.via,
            _ => continue,
        };
        match slot {
            Some(existing) => {
                existing.push_str("; ");
                existing.push_str(&span);
            }
            None => *slot = Some(span),
        }
    }
}

/// Order the trace chronologically and fill in the computed hop fields.
///
/// Input arrives newest-first (header stacking order) and is reversed in
/// place. Returns the total elapsed time across the trace as a display
/// string — negative when the clocks ran backwards — or `None` when fewer
/// than two hops carry a usable timestamp.
pub fn compute_deltas(hops: &mut [HopRecord]) -> Option<String> {
    hops.reverse();

    // Pass 1: total positive drift. A hop without a usable time does not
    // break the chain — the last seen valid time persists across it.
    let mut i_delta: i64 = 0;
    let mut last_valid: Option<i64> = None;
    for hop in hops.iter() {
        if let Some(ts) = hop.date_num {
            if let Some(prev) = last_valid {
                let delta = ts - prev;
                if delta > 0 {
                    i_delta += delta;
                }
            }
            last_valid = Some(ts);
        }
    }

    // Pass 2: numbering, per-hop delay, share of the total.
    let mut prev_valid: Option<i64> = None;
    for (idx, hop) in hops.iter_mut().enumerate() {
        hop.hop = idx + 1;
        if let Some(ts) = hop.date_num {
            if let Some(prev) = prev_valid {
                let delta = ts - prev;
                hop.delay = Some(format_delay(delta));
                if i_delta != 0 {
                    hop.delay_sort = delta;
                    if delta > 0 {
                        hop.percent = 100.0 * delta as f64 / i_delta as f64;
                    }
                }
            }
            prev_valid = Some(ts);
        }
    }

    let mut timed = hops.iter().filter_map(|h| h.date_num);
    let first = timed.next()?;
    let last = timed.last()?;
    Some(format_delay(last - first))
}

/// Render a millisecond delta as a human-readable duration.
///
/// Under one second is `"0 seconds"`; otherwise minutes and seconds, the
/// minutes clause omitted when zero, the seconds clause omitted only for an
/// exact whole number of minutes.
pub fn format_delay(ms: i64) -> String {
    if ms.abs() < 1000 {
        return format!("0 {}", i18n::unit_seconds());
    }

    let total_secs = ms.abs() / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;

    let mut out = String::new();
    if ms < 0 {
        out.push('-');
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes} {}", i18n::unit_minutes_for(minutes)));
        if seconds > 0 {
            out.push(' ');
        }
    }
    if seconds > 0 || minutes == 0 {
        out.push_str(&format!("{seconds} {}", i18n::unit_seconds_for(seconds)));
    }
    out
}
