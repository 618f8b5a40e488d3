//! Action path composition.
//!
//! Caller-supplied IDs are escaped as single path segments so the URL parser
//! never splits, re-encodes or collapses them.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::error::{ClientError, ClientResult};

/// Everything except RFC 3986 unreserved characters.
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Escape `value` as one path segment.
///
/// Empty values and the dot segments `.` and `..` are rejected: they would
/// address a different resource once the URL is normalized.
pub(crate) fn segment(value: &str) -> ClientResult<String> {
    if matches!(value, "" | "." | "..") {
        return Err(ClientError::InvalidPathSegment(value.to_owned()));
    }
    Ok(utf8_percent_encode(value, SEGMENT_ENCODE_SET).to_string())
}

/// Join an action name and escaped ID segments with `/`.
pub(crate) fn action_path(action_name: &str, ids: &[&str]) -> ClientResult<String> {
    let mut path = action_name.to_owned();
    for id in ids {
        path.push('/');
        path.push_str(&segment(id)?);
    }
    Ok(path)
}
