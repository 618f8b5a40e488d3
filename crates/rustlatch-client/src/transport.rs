//! Signed HTTP transport.
//!
//! [`Transport`] is the only place in RustLatch that performs network I/O. It
//! turns a [`RequestDescriptor`] into a signed `reqwest` request, sends it, and
//! hands the body to [`interpret_response`]. It never retries.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use http::StatusCode;
use rustlatch_auth::{
    Credential, FormParams, HttpMethod, RequestDescriptor, SignedRequest, sign_request,
};
use rustlatch_core::LatchConfig;
use rustlatch_core::protocol::{FORM_CONTENT_TYPE, USER_AGENT};
use rustlatch_model::{LatchResponse, ResponseKind, check_error};
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{ClientError, ClientResult};
use crate::observer::RequestObserver;

/// HTTP transport shared by the Application and User API clients.
#[derive(Clone)]
pub struct Transport {
    http: reqwest::Client,
    config: Arc<LatchConfig>,
    clock: Arc<dyn Clock>,
    observers: Vec<Arc<dyn RequestObserver>>,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

impl Transport {
    /// Build a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidProxy`] if the proxy URL is rejected and
    /// [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(config: LatchConfig) -> ClientResult<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT);

        if let Some(proxy_url) = &config.proxy {
            let proxy =
                reqwest::Proxy::all(proxy_url.as_str()).map_err(|source| ClientError::InvalidProxy {
                    url: proxy_url.clone(),
                    source,
                })?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http: builder.build()?,
            config: Arc::new(config),
            clock: Arc::new(SystemClock),
            observers: Vec::new(),
        })
    }

    /// Replace the timestamp source.
    #[must_use]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Register a request observer.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// The configuration this transport was built from.
    #[must_use]
    pub fn config(&self) -> &LatchConfig {
        &self.config
    }

    /// Describe a call to `action_path`, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Auth`] if the resulting URL is invalid.
    pub fn describe(
        &self,
        method: HttpMethod,
        action_path: &str,
        params: FormParams,
    ) -> ClientResult<RequestDescriptor> {
        let descriptor =
            RequestDescriptor::builder(method, self.config.endpoint(action_path), self.clock.now())
                .params(params)
                .build()?;
        Ok(descriptor)
    }

    /// Turn a signed descriptor into a `reqwest` request without sending it.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if `reqwest` rejects a header or the URL.
    pub fn prepare(
        &self,
        descriptor: &RequestDescriptor,
        signed: &SignedRequest,
    ) -> ClientResult<reqwest::Request> {
        let mut builder = self
            .http
            .request(descriptor.method().into(), descriptor.url().clone());

        for (name, value) in signed.header_pairs() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &signed.body {
            builder = builder
                .header(http::header::CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body.clone());
        }

        Ok(builder.build()?)
    }

    /// Sign, send, and decode one call.
    ///
    /// # Errors
    ///
    /// See [`interpret_response`] for protocol errors; connection failures are
    /// returned as [`ClientError::Http`].
    pub async fn execute(
        &self,
        credential: &Credential,
        descriptor: &RequestDescriptor,
        kind: ResponseKind,
    ) -> ClientResult<LatchResponse> {
        let signed = sign_request(credential, descriptor);
        let request = self.prepare(descriptor, &signed)?;

        for observer in &self.observers {
            observer.on_request_start(descriptor);
        }
        debug!(
            method = %descriptor.method(),
            path = %descriptor.path_and_query(),
            date = %signed.date,
            "Sending Latch request"
        );

        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        for observer in &self.observers {
            observer.on_response_receive(descriptor, status, &body);
        }
        debug!(status = %status, bytes = body.len(), "Received Latch response");

        interpret_response(status, &body, kind)
    }

    /// Describe and execute a call in one step.
    ///
    /// # Errors
    ///
    /// Same as [`Transport::describe`] and [`Transport::execute`].
    pub async fn call(
        &self,
        credential: &Credential,
        method: HttpMethod,
        action_path: &str,
        params: FormParams,
        kind: ResponseKind,
    ) -> ClientResult<LatchResponse> {
        let descriptor = self.describe(method, action_path, params)?;
        self.execute(credential, &descriptor, kind).await
    }
}

/// Classify a raw response.
///
/// A non-200 status is a transport failure. A 200 whose body carries a
/// non-zero error code is a protocol failure. Anything else is decoded as
/// `kind`.
///
/// # Errors
///
/// Returns [`ClientError::Status`], [`ClientError::Api`], or
/// [`ClientError::Model`] as described above.
pub fn interpret_response(
    status: StatusCode,
    body: &str,
    kind: ResponseKind,
) -> ClientResult<LatchResponse> {
    if status != StatusCode::OK {
        warn!(status = %status, "Latch request failed at HTTP level");
        return Err(ClientError::Status {
            status,
            body: body.to_owned(),
        });
    }

    if let Err(err) = check_error(body) {
        let err = ClientError::from(err);
        if let Some(code) = err.api_code() {
            warn!(code, error = %err, "Latch returned an error");
        }
        return Err(err);
    }

    Ok(LatchResponse::decode(kind, body)?)
}
