//! Fixed constants of the Latch (11Paths) request protocol.
//!
//! Everything here is part of the wire contract with the remote service and
//! must not change at runtime.

/// Default service endpoint.
pub const DEFAULT_API_URL: &str = "https://latch.elevenpaths.com";

/// Path prefix shared by every API call.
pub const API_PATH: &str = "/api";

/// Default API version segment.
pub const DEFAULT_API_VERSION: &str = "1.0";

/// Scheme identifier that opens the `Authorization` header value.
pub const AUTHENTICATION_SCHEME: &str = "11PATHS";

/// Name of the header carrying the signed authorization value.
pub const AUTHORIZATION_HEADER_NAME: &str = "Authorization";

/// Name of the header carrying the signed timestamp.
pub const DATE_HEADER_NAME: &str = "X-11Paths-Date";

/// Separator between the fields of the authorization header value.
pub const AUTHORIZATION_FIELD_SEPARATOR: &str = " ";

/// Prefix every custom protocol header name starts with.
pub const X_11PATHS_HEADER_PREFIX: &str = "X-11Paths-";

/// Whether `name` carries the custom protocol header prefix, ignoring case.
#[must_use]
pub fn is_protocol_header(name: &str) -> bool {
    name.get(..X_11PATHS_HEADER_PREFIX.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(X_11PATHS_HEADER_PREFIX))
}

/// Separator between a canonical header name and its value.
pub const X_11PATHS_HEADER_SEPARATOR: &str = ":";

/// `chrono` layout of the signed timestamp (`YYYY-MM-DD HH:MM:SS`, UTC).
pub const UTC_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Content type of POST/PUT bodies.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("rustlatch/", env!("CARGO_PKG_VERSION"));

/// Action path segments of the Application and User APIs.
pub mod action {
    /// Account or operation status.
    pub const CHECK_STATUS: &str = "status";
    /// Pair with a token.
    pub const PAIR: &str = "pair";
    /// Pair with a known account ID.
    pub const PAIR_WITH_ID: &str = "pairWithId";
    /// Unpair an account.
    pub const UNPAIR: &str = "unpair";
    /// Lock an account or operation.
    pub const LOCK: &str = "lock";
    /// Unlock an account or operation.
    pub const UNLOCK: &str = "unlock";
    /// Account history.
    pub const HISTORY: &str = "history";
    /// Operation management.
    pub const OPERATION: &str = "operation";
    /// Application management (User API).
    pub const APPLICATION: &str = "application";
    /// Subscription information (User API).
    pub const SUBSCRIPTION: &str = "subscription";
    /// Segment introducing an operation ID inside an account path.
    pub const OPERATION_SEGMENT: &str = "op";
    /// Status suffix that omits the one-time password.
    pub const NOOTP_SUFFIX: &str = "nootp";
    /// Status suffix that suppresses push notifications.
    pub const SILENT_SUFFIX: &str = "silent";
}

/// Form parameter names used by operation and application management.
pub mod param {
    /// Parent application or operation ID.
    pub const PARENT_ID: &str = "parentId";
    /// Display name.
    pub const NAME: &str = "name";
    /// Two-factor policy.
    pub const TWO_FACTOR: &str = "two_factor";
    /// Lock-on-request policy.
    pub const LOCK_ON_REQUEST: &str = "lock_on_request";
    /// Application contact email.
    pub const CONTACT_EMAIL: &str = "contactEmail";
    /// Application contact phone.
    pub const CONTACT_PHONE: &str = "contactPhone";
}
