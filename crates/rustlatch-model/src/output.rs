//! Response payload shapes of the Latch Application and User APIs.
//!
//! Every successful response wraps its payload in a `data` object. Maps keyed
//! by application or operation ID use `BTreeMap` so that "the first entry" is
//! well defined when the service returns a single-entry map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{LatchStatus, TwoFactorPolicy};

// ---------------------------------------------------------------------------
// Application API
// ---------------------------------------------------------------------------

/// Output of `pair` and `pairWithId`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairResponse {
    /// Payload.
    pub data: PairData,
}

/// Payload of [`PairResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairData {
    /// Account ID to store for later status checks.
    pub account_id: String,
}

impl PairResponse {
    /// The paired account ID.
    #[must_use]
    pub fn account_id(&self) -> &str {
        &self.data.account_id
    }
}

/// Output of `status` for an account or an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Payload.
    pub data: StatusData,
}

/// Payload of [`StatusResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusData {
    /// Status keyed by application or operation ID.
    #[serde(default)]
    pub operations: BTreeMap<String, OperationStatus>,
}

/// Status of one application or operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationStatus {
    /// Latch state.
    pub status: LatchStatus,
    /// One-time password data, when requested and generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_factor: Option<TwoFactor>,
    /// Nested operation states.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operations: BTreeMap<String, OperationStatus>,
}

/// One-time password issued along with a status check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoFactor {
    /// The token the user must enter.
    pub token: String,
    /// When the token was generated.
    #[serde(default)]
    pub generated: serde_json::Value,
}

impl StatusResponse {
    /// The entry of the queried application or operation.
    #[must_use]
    pub fn parent_operation(&self) -> Option<&OperationStatus> {
        self.data.operations.values().next()
    }

    /// Latch state of the queried application or operation.
    #[must_use]
    pub fn status(&self) -> Option<LatchStatus> {
        self.parent_operation().map(|op| op.status)
    }

    /// One-time password data of the queried entry.
    #[must_use]
    pub fn two_factor(&self) -> Option<&TwoFactor> {
        self.parent_operation().and_then(|op| op.two_factor.as_ref())
    }

    /// Nested operations of the queried entry.
    #[must_use]
    pub fn operations(&self) -> Option<&BTreeMap<String, OperationStatus>> {
        self.parent_operation().map(|op| &op.operations)
    }
}

/// Output of adding an operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOperationResponse {
    /// Payload.
    pub data: AddOperationData,
}

/// Payload of [`AddOperationResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOperationData {
    /// ID of the new operation.
    pub operation_id: String,
}

impl AddOperationResponse {
    /// ID of the new operation.
    #[must_use]
    pub fn operation_id(&self) -> &str {
        &self.data.operation_id
    }
}

/// Output of showing one or all operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowOperationResponse {
    /// Payload.
    pub data: ShowOperationData,
}

/// Payload of [`ShowOperationResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowOperationData {
    /// Operations keyed by operation ID.
    #[serde(default)]
    pub operations: BTreeMap<String, Operation>,
}

/// An operation definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Display name.
    pub name: String,
    /// Two-factor policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub two_factor: Option<TwoFactorPolicy>,
    /// Lock-on-request policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_on_request: Option<TwoFactorPolicy>,
    /// Nested operations.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub operations: BTreeMap<String, Operation>,
}

impl ShowOperationResponse {
    /// The first (usually only) operation returned.
    #[must_use]
    pub fn operation(&self) -> Option<(&str, &Operation)> {
        self.data
            .operations
            .iter()
            .next()
            .map(|(id, op)| (id.as_str(), op))
    }

    /// All returned operations keyed by ID.
    #[must_use]
    pub fn operations(&self) -> &BTreeMap<String, Operation> {
        &self.data.operations
    }
}

/// Output of the account history query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Payload.
    pub data: HistoryData,
}

/// Payload of [`HistoryResponse`].
///
/// Alongside the fixed fields the payload holds one entry keyed by the
/// application ID; it is kept in `applications`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryData {
    /// Last time the user was seen, in milliseconds since the epoch.
    #[serde(default)]
    pub last_seen: Option<i64>,
    /// Client app versions of the user.
    #[serde(default)]
    pub client_version: Vec<ClientVersion>,
    /// Number of history entries.
    #[serde(default)]
    pub count: u64,
    /// History entries.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Remaining keys, the application entry among them.
    #[serde(flatten)]
    pub applications: BTreeMap<String, serde_json::Value>,
}

/// A client application version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientVersion {
    /// Platform name.
    #[serde(default)]
    pub platform: String,
    /// App version.
    #[serde(default)]
    pub app: String,
}

/// One change recorded in the account history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Time of the change, in milliseconds since the epoch.
    #[serde(default)]
    pub t: i64,
    /// Action performed.
    #[serde(default)]
    pub action: String,
    /// Attribute changed.
    #[serde(default)]
    pub what: String,
    /// New value.
    #[serde(default)]
    pub value: serde_json::Value,
    /// Previous value.
    #[serde(default)]
    pub was: serde_json::Value,
    /// Name of the application or operation.
    #[serde(default)]
    pub name: String,
    /// User agent of the actor.
    #[serde(default)]
    pub user_agent: String,
    /// IP address of the actor.
    #[serde(default)]
    pub ip: String,
}

/// Application state as reported in the history payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryApplication {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Latch state.
    #[serde(default)]
    pub status: Option<LatchStatus>,
    /// When the account was paired, in milliseconds since the epoch.
    #[serde(default)]
    pub paired_on: Option<i64>,
    /// Two-factor policy.
    #[serde(default, rename = "two_factor")]
    pub two_factor: Option<TwoFactorPolicy>,
    /// Lock-on-request policy.
    #[serde(default, rename = "lock_on_request")]
    pub lock_on_request: Option<TwoFactorPolicy>,
    /// Operation definitions.
    #[serde(default)]
    pub operations: BTreeMap<String, serde_json::Value>,
}

impl HistoryResponse {
    /// The application entry keyed by `app_id`, if present and well formed.
    #[must_use]
    pub fn application(&self, app_id: &str) -> Option<HistoryApplication> {
        self.data
            .applications
            .get(app_id)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// History entries.
    #[must_use]
    pub fn history(&self) -> &[HistoryEntry] {
        &self.data.history
    }
}

// ---------------------------------------------------------------------------
// User API
// ---------------------------------------------------------------------------

/// Output of the subscription query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    /// Payload.
    pub data: SubscriptionData,
}

/// Payload of [`SubscriptionResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionData {
    /// Subscription details.
    pub subscription: Subscription,
}

/// A user's subscription plan and usage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Plan identifier.
    pub id: String,
    /// Application usage.
    #[serde(default)]
    pub applications: Usage,
    /// Paired user usage.
    #[serde(default)]
    pub users: Usage,
    /// Operation usage keyed by application name.
    #[serde(default)]
    pub operations: BTreeMap<String, Usage>,
}

/// Usage counter against a plan limit; a negative limit means unlimited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Units in use.
    #[serde(default)]
    pub in_use: i64,
    /// Plan limit.
    #[serde(default)]
    pub limit: i64,
}

impl SubscriptionResponse {
    /// The subscription details.
    #[must_use]
    pub fn subscription(&self) -> &Subscription {
        &self.data.subscription
    }
}

/// Output of listing the user's applications.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowApplicationsResponse {
    /// Payload.
    pub data: ShowApplicationsData,
}

/// Payload of [`ShowApplicationsResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowApplicationsData {
    /// Applications keyed by application ID.
    #[serde(default)]
    pub operations: BTreeMap<String, Application>,
}

/// An application registered by a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Application secret.
    #[serde(default)]
    pub secret: String,
    /// Contact email.
    #[serde(default)]
    pub contact_email: String,
    /// Contact phone.
    #[serde(default)]
    pub contact_phone: String,
    /// Logo URL.
    #[serde(default, rename = "imageURL")]
    pub image_url: String,
    /// Two-factor policy.
    #[serde(default, rename = "two_factor")]
    pub two_factor: Option<TwoFactorPolicy>,
    /// Lock-on-request policy.
    #[serde(default, rename = "lock_on_request")]
    pub lock_on_request: Option<TwoFactorPolicy>,
    /// Operation definitions.
    #[serde(default)]
    pub operations: BTreeMap<String, Operation>,
}

impl ShowApplicationsResponse {
    /// Applications keyed by application ID.
    #[must_use]
    pub fn applications(&self) -> &BTreeMap<String, Application> {
        &self.data.operations
    }
}

/// Output of adding an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddApplicationResponse {
    /// Payload.
    pub data: AddApplicationData,
}

/// Payload of [`AddApplicationResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddApplicationData {
    /// ID of the new application.
    pub application_id: String,
    /// Secret of the new application.
    pub secret: String,
}

impl AddApplicationResponse {
    /// ID of the new application.
    #[must_use]
    pub fn application_id(&self) -> &str {
        &self.data.application_id
    }

    /// Secret of the new application.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.data.secret
    }
}

/// Application attributes sent when adding or updating an application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationInfo {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub contact_email: String,
    /// Contact phone.
    pub contact_phone: String,
    /// Two-factor policy.
    pub two_factor: TwoFactorPolicy,
    /// Lock-on-request policy.
    pub lock_on_request: TwoFactorPolicy,
}
