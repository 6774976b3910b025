//! RFC 2047 encoded-word decoding.
//!
//! Header values embed non-ASCII text as `=?charset?Q|B?data?=` tokens.
//! Decoding is best-effort per token: a token that fails to decode is left
//! in the output exactly as it appeared.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::warn;

/// Decode every encoded-word token in `input`.
///
/// Whitespace separating two adjacent encoded words is part of the encoding
/// and is dropped (RFC 2047 §6.2). Plain text passes through untouched, so
/// the function is idempotent on already-decoded values.
///
/// # Examples
/// `"=?UTF-8?B?SG9sYQ==?= =?UTF-8?B?IG11bmRv?="` → `"Hola mundo"`
pub fn decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    let mut prev_was_word = false;

    while let Some(start) = rest.find("=?") {
        let gap = &rest[..start];
        match decode_word(&rest[start..]) {
            Some(word) => {
                if !(prev_was_word && gap.chars().all(char::is_whitespace)) {
                    out.push_str(gap);
                }
                out.push_str(&word.text);
                rest = &rest[start + word.consumed..];
                prev_was_word = true;
            }
            None => {
                out.push_str(gap);
                out.push_str("=?");
                rest = &rest[start + 2..];
                prev_was_word = false;
            }
        }
    }

    out.push_str(rest);
    out
}

struct DecodedWord {
    text: String,
    /// Bytes consumed from the input, including the leading `=?`.
    consumed: usize,
}

/// Try to decode one token. `s` starts at the `=?` marker.
fn decode_word(s: &str) -> Option<DecodedWord> {
    let body = s.get(2..)?;
    let (charset, rest) = body.split_once('?')?;
    let (encoding, rest) = rest.split_once('?')?;
    let end = rest.find("?=")?;
    let payload = &rest[..end];

    let consumed = 2 + charset.len() + 1 + encoding.len() + 1 + end + 2;

    let bytes = if encoding.eq_ignore_ascii_case("B") {
        BASE64.decode(payload.trim()).ok()?
    } else if encoding.eq_ignore_ascii_case("Q") {
        decode_q(payload)
    } else {
        return None;
    };

    Some(DecodedWord {
        text: decode_charset(charset, &bytes),
        consumed,
    })
}

/// Decode Q-encoding: underscores → spaces, `=XX` → byte.
fn decode_q(input: &str) -> Vec<u8> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'_' => {
                out.push(b' ');
                i += 1;
            }
            b'=' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap_or("");
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                } else {
                    out.push(b'=');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    out
}

/// Reinterpret decoded bytes under the token's charset.
///
/// Charset labels are resolved case-insensitively through `encoding_rs`;
/// unrecognized labels fall back to lossy UTF-8.
fn decode_charset(charset: &str, bytes: &[u8]) -> String {
    if let Some(encoding) = encoding_rs::Encoding::for_label(charset.trim().as_bytes()) {
        let (text, _, _) = encoding.decode(bytes);
        text.into_owned()
    } else {
        warn!(charset, "unrecognized charset, decoding as UTF-8");
        String::from_utf8_lossy(bytes).into_owned()
    }
}
