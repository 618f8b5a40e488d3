//! Immutable per-call request descriptors.
//!
//! A [`RequestDescriptor`] holds everything needed to sign and send one call:
//! method, absolute target URI, timestamp, custom headers, and form params.
//! It is validated once by [`RequestDescriptorBuilder::build`] and never
//! mutated afterwards, so signing it any number of times gives the same result.
//!
//! The target URL is parsed exactly once, into the [`Url`] that the transport
//! sends. The signed path and query are sliced out of that same value, so
//! whatever normalization the parser applies (percent-encoding, dot segments)
//! is applied to both sides.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use rustlatch_core::protocol::UTC_DATE_FORMAT;
use url::{Position, Url};

use crate::error::AuthError;

/// Form parameters: name mapped to one or more values.
///
/// Value order is not significant; values are sorted during canonicalization.
pub type FormParams = BTreeMap<String, Vec<String>>;

/// HTTP methods accepted by the Latch API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// The method token as it appears on the wire and in the string to sign.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a form body (POST and PUT).
    #[must_use]
    pub fn carries_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(AuthError::UnsupportedMethod(s.to_owned())),
        }
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// Everything needed to sign and send a single API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    method: HttpMethod,
    url: Url,
    timestamp: DateTime<Utc>,
    headers: Vec<(String, String)>,
    params: FormParams,
}

impl RequestDescriptor {
    /// Start building a descriptor for `method` against the absolute URL `url`,
    /// signed with `timestamp`.
    ///
    /// Sub-second precision of `timestamp` is dropped.
    pub fn builder(
        method: HttpMethod,
        url: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder {
            method,
            url: url.into(),
            timestamp,
            headers: Vec::new(),
            params: FormParams::new(),
        }
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The parsed absolute target URL, as it will be sent.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Path plus query string exactly as it will be sent.
    #[must_use]
    pub fn path_and_query(&self) -> &str {
        &self.url[Position::BeforePath..Position::AfterQuery]
    }

    /// The signing timestamp, whole seconds only.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The timestamp formatted as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn formatted_date(&self) -> String {
        self.timestamp.format(UTC_DATE_FORMAT).to_string()
    }

    /// Custom protocol headers in insertion order, names as supplied.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Form parameters.
    #[must_use]
    pub fn params(&self) -> &FormParams {
        &self.params
    }
}

/// Builder for [`RequestDescriptor`].
#[derive(Debug, Clone)]
pub struct RequestDescriptorBuilder {
    method: HttpMethod,
    url: String,
    timestamp: DateTime<Utc>,
    headers: Vec<(String, String)>,
    params: FormParams,
}

impl RequestDescriptorBuilder {
    /// Add a custom protocol header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several custom protocol headers.
    #[must_use]
    pub fn headers<K, V>(mut self, headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Append one value to the form parameter `name`.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Append every value of every parameter in `params`.
    #[must_use]
    pub fn params<K, I, V>(mut self, params: impl IntoIterator<Item = (K, I)>) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for (name, values) in params {
            self.params
                .entry(name.into())
                .or_default()
                .extend(values.into_iter().map(Into::into));
        }
        self
    }

    /// Validate the input and produce the immutable descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidUri`] or [`AuthError::RelativeUri`] if the
    /// URL is unusable, [`AuthError::InvalidHeaderName`] for a header name that
    /// is not a valid HTTP token, and [`AuthError::DuplicateHeader`] if two
    /// header names are equal ignoring case.
    pub fn build(self) -> Result<RequestDescriptor, AuthError> {
        let url = match Url::parse(&self.url) {
            Ok(url) if url.has_host() => url,
            Ok(_) | Err(url::ParseError::RelativeUrlWithoutBase) => {
                return Err(AuthError::RelativeUri(self.url));
            }
            Err(e) => {
                return Err(AuthError::InvalidUri {
                    uri: self.url,
                    reason: e.to_string(),
                });
            }
        };

        let mut seen = HashSet::with_capacity(self.headers.len());
        for (name, _) in &self.headers {
            if http::HeaderName::from_bytes(name.as_bytes()).is_err() {
                return Err(AuthError::InvalidHeaderName(name.clone()));
            }
            if !seen.insert(name.to_lowercase()) {
                return Err(AuthError::DuplicateHeader(name.clone()));
            }
        }

        Ok(RequestDescriptor {
            method: self.method,
            url,
            timestamp: self.timestamp.trunc_subsecs(0),
            headers: self.headers,
            params: self.params,
        })
    }
}
