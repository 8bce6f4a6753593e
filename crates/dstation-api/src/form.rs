//! Form and query parameter encoding
//!
//! Magnet links and file paths arrive both plain and pre-escaped, so every
//! component is percent-decoded once before re-encoding. That makes the
//! encoder idempotent: feeding its own output back in yields the same string,
//! and the server always decodes back to the original value.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in form keys and values. Keeps the unreserved set
/// plain and escapes everything that is structural in a form body
/// (`&`, `=`, `+`) or a URL.
const FORM_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Percent-encodes one key or value for a form body or query string.
///
/// Existing percent-escapes are decoded first, so already-escaped input is
/// not double-encoded. Invalid escape sequences are treated as literal text.
pub fn encode_component(raw: &str) -> String {
    let decoded = match percent_decode_str(raw).decode_utf8() {
        Ok(plain) => plain.into_owned(),
        // Not valid percent-encoded UTF-8: treat the input as literal
        Err(_) => raw.to_string(),
    };
    utf8_percent_encode(&decoded, FORM_ENCODE_SET).to_string()
}

/// Encodes key/value pairs into an `application/x-www-form-urlencoded` body
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

// ============================================================================
// Tests
// ============================================================================
