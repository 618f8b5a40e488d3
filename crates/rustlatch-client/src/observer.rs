//! Request lifecycle hooks.

use http::StatusCode;
use rustlatch_auth::RequestDescriptor;

/// Callbacks invoked around every API call.
///
/// Both methods default to doing nothing. Observers must not block: they run
/// inline on the task that issues the request.
pub trait RequestObserver: Send + Sync {
    /// Called right before the request is sent.
    fn on_request_start(&self, _descriptor: &RequestDescriptor) {}

    /// Called once the full response body has been read.
    fn on_response_receive(&self, _descriptor: &RequestDescriptor, _status: StatusCode, _body: &str) {
    }
}
