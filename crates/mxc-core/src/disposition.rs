//! Content-Disposition derivation for uploaded media.

use percent_encoding::{percent_encode, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::{ContentDisposition, Filename};

/// Bytes escaped when a value is placed in a single URL path segment.
///
/// Unreserved characters and the sub-delimiters allowed inside a segment are
/// kept; `/`, `?`, `%`, whitespace, controls and all non-ASCII bytes are escaped.
pub const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b',')
    .remove(b':')
    .remove(b';')
    .remove(b'=')
    .remove(b'@');

/// Percent-encode `value` as a URL path segment.
pub fn escape_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// `inline; filename*=utf-8''<escaped name>` (RFC 6266 extended filename form).
pub fn inline_disposition(filename: &Filename) -> ContentDisposition {
    ContentDisposition::new(format!(
        "inline; filename*=utf-8''{}",
        percent_encode(filename.as_bytes(), PATH_SEGMENT)
    ))
}
