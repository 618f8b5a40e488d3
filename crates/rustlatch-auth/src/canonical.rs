//! Canonical string-to-sign construction for 11Paths request signing.
//!
//! The string to sign is the newline-separated concatenation of:
//!
//! ```text
//! HTTPMethod\n
//! Date\n
//! CanonicalHeaders\n
//! PathAndQuery
//! [\nCanonicalParams]      (POST and PUT only)
//! ```
//!
//! Every component is normalized so that the same request description always
//! yields the same bytes. The server recomputes this string on its side, so any
//! deviation here shows up as a rejected signature.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rustlatch_core::protocol::X_11PATHS_HEADER_SEPARATOR;

use crate::request::{FormParams, HttpMethod, RequestDescriptor};

/// Characters that must be percent-encoded in form parameter names and values.
///
/// Alphanumerics and `* - . _` pass through as in form encoding. Square
/// brackets are also left raw so array-style names like `B[]` sign as written.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'[')
    .remove(b']');

/// Build the full string to sign for a descriptor.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use rustlatch_auth::{HttpMethod, RequestDescriptor};
/// use rustlatch_auth::canonical::string_to_sign;
///
/// let descriptor = RequestDescriptor::builder(
///     HttpMethod::Get,
///     "https://latch.elevenpaths.com/api/1.0/pair/token",
///     Utc.with_ymd_and_hms(2015, 2, 15, 14, 53, 0).unwrap(),
/// )
/// .build()
/// .unwrap();
///
/// assert_eq!(
///     string_to_sign(&descriptor),
///     "GET\n2015-02-15 14:53:00\n\n/api/1.0/pair/token"
/// );
/// ```
#[must_use]
pub fn string_to_sign(descriptor: &RequestDescriptor) -> String {
    let headers: Vec<(&str, &str)> = descriptor
        .headers()
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    let canonical_headers = build_canonical_headers(&headers);
    let canonical_params = if descriptor.method().carries_body() {
        build_canonical_params(descriptor.params())
    } else {
        String::new()
    };

    build_string_to_sign(
        descriptor.method(),
        &descriptor.formatted_date(),
        &canonical_headers,
        descriptor.path_and_query(),
        &canonical_params,
    )
}

/// Assemble the string to sign from already-canonical components.
///
/// `canonical_params` is appended only when `method` carries a body; for GET
/// and DELETE it is ignored.
///
/// # Examples
///
/// ```
/// use rustlatch_auth::HttpMethod;
/// use rustlatch_auth::canonical::build_string_to_sign;
///
/// let sts = build_string_to_sign(HttpMethod::Delete, "2015-02-15 14:53:00", "", "/api/1.0/operation/x", "a=b");
/// assert_eq!(sts, "DELETE\n2015-02-15 14:53:00\n\n/api/1.0/operation/x");
/// ```
#[must_use]
pub fn build_string_to_sign(
    method: HttpMethod,
    date: &str,
    canonical_headers: &str,
    path_and_query: &str,
    canonical_params: &str,
) -> String {
    let mut sts = format!("{method}\n{date}\n{canonical_headers}\n{path_and_query}");
    if method.carries_body() {
        sts.push('\n');
        sts.push_str(canonical_params);
    }
    sts
}

/// Build the canonical header string.
///
/// Header names are lowercased and line breaks inside values become a single
/// space. Pairs are emitted as `name:value`, sorted by name, and joined with one
/// space.
///
/// # Examples
///
/// ```
/// use rustlatch_auth::canonical::build_canonical_headers;
///
/// let headers = [("X-11Paths-B", "two"), ("X-11Paths-A", "one\nline")];
/// assert_eq!(
///     build_canonical_headers(&headers),
///     "x-11paths-a:one line x-11paths-b:two"
/// );
/// assert_eq!(build_canonical_headers(&[]), "");
/// ```
#[must_use]
pub fn build_canonical_headers(headers: &[(&str, &str)]) -> String {
    let mut pairs: Vec<(String, Cow<'_, str>)> = headers
        .iter()
        .map(|(name, value)| (name.to_lowercase(), sanitize_header_value(value)))
        .collect();
    pairs.sort_by(|a, b| a.0.cmp(&b.0));

    pairs
        .iter()
        .map(|(name, value)| format!("{name}{X_11PATHS_HEADER_SEPARATOR}{value}"))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(' ')
        .to_owned()
}

/// Build the canonical form parameter string.
///
/// Each parameter's values are sorted, then parameters are emitted in name
/// order as `name=value` pairs joined with `&`. Names and values are
/// form-encoded. This string doubles as the POST/PUT request body.
///
/// # Examples
///
/// ```
/// use rustlatch_auth::FormParams;
/// use rustlatch_auth::canonical::build_canonical_params;
///
/// let mut params = FormParams::new();
/// params.insert("B[]".to_owned(), vec!["B".to_owned(), "A".to_owned()]);
/// params.insert("A".to_owned(), vec!["A".to_owned()]);
/// assert_eq!(build_canonical_params(&params), "A=A&B[]=A&B[]=B");
/// ```
#[must_use]
pub fn build_canonical_params(params: &FormParams) -> String {
    let mut names: Vec<&String> = params.keys().collect();
    names.sort_unstable();

    let mut pairs = Vec::new();
    for name in names {
        let mut values: Vec<&String> = params[name].iter().collect();
        values.sort_unstable();
        let encoded_name = form_encode(name);
        for value in values {
            pairs.push(format!("{encoded_name}={}", form_encode(value)));
        }
    }

    pairs
        .join("&")
        .trim_matches(|c| c == '&' || c == ' ')
        .to_owned()
}

/// Replace every line break in a header value with a single space.
///
/// `\r\n`, `\n` and `\r` each count as one line break.
#[must_use]
pub fn sanitize_header_value(value: &str) -> Cow<'_, str> {
    if !value.contains(['\r', '\n']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace("\r\n", " ").replace(['\r', '\n'], " "))
}

/// Form-encode a single name or value; spaces become `+`.
fn form_encode(input: &str) -> String {
    input
        .split(' ')
        .map(|part| utf8_percent_encode(part, FORM_ENCODE_SET).to_string())
        .collect::<Vec<_>>()
        .join("+")
}
