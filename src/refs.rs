//! Reference URLs for well-known header names.
//!
//! A static, read-only table used to decorate the "other headers" bucket.
//! Not part of the parsing logic.

/// Known header names and where they are documented.
const HEADER_URLS: &[(&str, &str)] = &[
    (
        "Authentication-Results",
        "https://datatracker.ietf.org/doc/html/rfc8601",
    ),
    (
        "ARC-Authentication-Results",
        "https://datatracker.ietf.org/doc/html/rfc8617",
    ),
    (
        "ARC-Message-Signature",
        "https://datatracker.ietf.org/doc/html/rfc8617",
    ),
    ("ARC-Seal", "https://datatracker.ietf.org/doc/html/rfc8617"),
    ("Bcc", "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.3"),
    ("Cc", "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.3"),
    (
        "Content-Type",
        "https://datatracker.ietf.org/doc/html/rfc2045#section-5",
    ),
    (
        "Date",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.1",
    ),
    (
        "DKIM-Signature",
        "https://datatracker.ietf.org/doc/html/rfc6376",
    ),
    (
        "From",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.2",
    ),
    (
        "In-Reply-To",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.4",
    ),
    (
        "List-Unsubscribe",
        "https://datatracker.ietf.org/doc/html/rfc2369",
    ),
    (
        "Message-ID",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.4",
    ),
    (
        "MIME-Version",
        "https://datatracker.ietf.org/doc/html/rfc2045#section-4",
    ),
    (
        "Received",
        "https://datatracker.ietf.org/doc/html/rfc5321#section-4.4",
    ),
    (
        "Received-SPF",
        "https://datatracker.ietf.org/doc/html/rfc7208#section-9.1",
    ),
    (
        "References",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.4",
    ),
    (
        "Reply-To",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.2",
    ),
    (
        "Return-Path",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.7",
    ),
    (
        "Sender",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.2",
    ),
    (
        "Subject",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.5",
    ),
    (
        "To",
        "https://datatracker.ietf.org/doc/html/rfc5322#section-3.6.3",
    ),
    (
        "X-Forefront-Antispam-Report",
        "https://learn.microsoft.com/en-us/defender-office-365/message-headers-eop-mdo#x-forefront-antispam-report-message-header-fields",
    ),
    (
        "X-Microsoft-Antispam",
        "https://learn.microsoft.com/en-us/defender-office-365/message-headers-eop-mdo#x-microsoft-antispam-message-header-fields",
    ),
    (
        "X-MS-Exchange-Organization-SCL",
        "https://learn.microsoft.com/en-us/defender-office-365/anti-spam-spam-confidence-level-scl-about",
    ),
];

/// Documentation link for a header name, matched case-insensitively.
pub fn lookup(header: &str) -> Option<&'static str> {
    HEADER_URLS
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(header))
        .map(|&(_, url)| url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_case_insensitive() {
        assert!(lookup("received").is_some());
        assert!(lookup("RECEIVED").is_some());
        assert_eq!(lookup("Received"), lookup("received"));
    }

    #[test]
    fn test_unknown_header_has_no_url() {
        assert!(lookup("X-Totally-Custom").is_none());
        assert!(lookup("").is_none());
    }
}
