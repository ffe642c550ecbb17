// src/view/link.rs
//
// Hashes and source names are opaque strings that end up as URL path segments.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Everything but unreserved characters is escaped, so `/`, `+`, `?`, `#` and
/// `%` survive the round trip through a path segment.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub fn encode_segment(raw: &str) -> String {
    utf8_percent_encode(raw, SEGMENT).to_string()
}

/// Percent-decode one path segment. A literal `+` stays a `+`.
pub fn decode_segment(segment: &str) -> String {
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// `/listings/{hash}/{op}` with the hash escaped.
pub fn listing_path(hash: &str, op: &str) -> String {
    format!("/listings/{}/{op}", encode_segment(hash))
}
