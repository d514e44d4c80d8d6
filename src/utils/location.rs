//! `Location` header encoding for redirect targets.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes escaped in a redirect target: controls, space, non-ASCII (always
/// escaped by `utf8_percent_encode`), and the characters browsers refuse
/// unescaped in a URL. `%` is left alone so existing escapes survive.
const LOCATION_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Percent-encodes a stored URL for use as a `Location` header value.
///
/// The result is visible ASCII only, so it is always a valid header value.
/// URLs that need no escaping come back unchanged.
pub fn encode_location(url: &str) -> String {
    utf8_percent_encode(url, LOCATION_ESCAPES).to_string()
}
