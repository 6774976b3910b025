//! Raw header block tokenization: line splitting and unfolding.
//!
//! The input is the untouched header block as delivered by a mailbox or
//! API client — line endings mixed, values folded across lines, encoded
//! words everywhere. Output is an ordered list of logical entries with
//! nothing silently dropped.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::entry::HeaderEntry;

use super::encoded_word;

/// Shape of a line that starts a new header: a run of non-whitespace
/// characters followed by a colon and the rest of the line.
fn header_start_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([^\s:]+): ?(.*)$").unwrap())
}

/// A 1–2 digit "name" is almost always a folded Received time fragment
/// (`16:31:20 +0000` on its own line), not a header named "16".
fn bare_time_name(name: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"^\d{1,2}$").unwrap());
    re.is_match(name)
}

/// Split a raw header block into ordered `(name, value)` entries.
///
/// Folding continuations are joined to the previous entry with a single
/// space; a continuation with no previous entry opens an entry with an
/// empty name. Values come out with encoded-words decoded, NULs stripped,
/// and trailing line-terminator remnants removed. Duplicate header names
/// stay separate entries, in source order.
pub fn tokenize(raw: &str) -> Vec<HeaderEntry> {
    let mut entries: Vec<HeaderEntry> = Vec::new();

    // Any of \r\n, \n, \r terminates a line; \r\n just yields an empty
    // segment, discarded with the other blank lines.
    for line in raw.split(['\n', '\r']) {
        if line.trim().is_empty() {
            continue;
        }

        let header_start = header_start_re()
            .captures(line)
            .filter(|caps| !bare_time_name(&caps[1]));

        match header_start {
            Some(caps) => {
                entries.push(HeaderEntry::new(&caps[1], caps[2].trim_end()));
            }
            None => {
                // Folding continuation.
                let folded = line.trim();
                match entries.last_mut() {
                    Some(last) => {
                        if !last.value.is_empty() {
                            last.value.push(' ');
                        }
                        last.value.push_str(folded);
                    }
                    None => entries.push(HeaderEntry::new("", folded)),
                }
            }
        }
    }

    for entry in &mut entries {
        let decoded = encoded_word::decode(&entry.value);
        let stripped: String = decoded.chars().filter(|&c| c != '\0').collect();
        entry.value = stripped.trim_end_matches(['\r', '\n']).to_string();
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_headers() {
        let entries = tokenize("Subject: Hello\nFrom: a@b.com\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], HeaderEntry::new("Subject", "Hello"));
        assert_eq!(entries[1], HeaderEntry::new("From", "a@b.com"));
    }

    #[test]
    fn test_folded_value() {
        let entries = tokenize("Subject: This is a long\n\tsubject line\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "This is a long subject line");
    }

    #[test]
    fn test_mixed_line_endings() {
        let entries = tokenize("A: 1\r\nB: 2\rC: 3\nD: 4");
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[3], HeaderEntry::new("D", "4"));
    }

    #[test]
    fn test_bare_time_is_continuation_not_header() {
        // A Received date folded right before its time can land at column 0
        // as "16:31:20 +0000" — that is not a header named "16".
        let entries = tokenize("Received: from a by b; Mon, 16 Apr 2018\n16:31:20 +0000\n");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, "from a by b; Mon, 16 Apr 2018 16:31:20 +0000");
    }

    #[test]
    fn test_leading_continuation_opens_empty_name_entry() {
        let entries = tokenize("    stray folded text\nSubject: ok\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], HeaderEntry::new("", "stray folded text"));
        assert_eq!(entries[1].name, "Subject");
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let entries = tokenize("Received: one\nReceived: two\nReceived: three\n");
        let values: Vec<&str> = entries.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, ["one", "two", "three"]);
    }

    #[test]
    fn test_encoded_words_decoded_and_nuls_stripped() {
        let entries = tokenize("Subject: =?UTF-8?Q?Caf=C3=A9?=\u{0}\n");
        assert_eq!(entries[0].value, "Café");
    }

    #[test]
    fn test_entry_count_bounded_by_line_count() {
        let raw = "A: 1\n continuation\nB: 2\n\n\nC: 3\n";
        let lines = raw.lines().count();
        assert!(tokenize(raw).len() <= lines);
    }

    #[test]
    fn test_no_character_loss_on_fold() {
        let raw = "X-Long: part one\n part two\n part three\n";
        let entries = tokenize(raw);
        assert_eq!(entries[0].value, "part one part two part three");
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\r\n\r").is_empty());
    }

    #[test]
    fn test_idempotent_on_decoded_output() {
        let first = tokenize("Subject: =?UTF-8?Q?Caf=C3=A9?=\n");
        let rebuilt = format!("Subject: {}\n", first[0].value);
        let second = tokenize(&rebuilt);
        assert_eq!(first, second);
    }
}
