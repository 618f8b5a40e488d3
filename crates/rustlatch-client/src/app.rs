//! Latch Application API client.
//!
//! Operations are signed with the application ID and secret. Every method
//! builds a fresh descriptor stamped with the transport's clock, so each call
//! carries its own timestamp.

use chrono::{DateTime, Utc};
use rustlatch_auth::{Credential, FormParams, HttpMethod};
use rustlatch_core::LatchConfig;
use rustlatch_core::protocol::{action, param};
use rustlatch_model::{
    AddOperationResponse, HistoryResponse, LatchResponse, ModelError, PairResponse,
    ResponseKind, ShowOperationResponse, StatusResponse, TwoFactorPolicy,
};

use crate::error::ClientResult;
use crate::path::action_path;
use crate::transport::Transport;

/// Client for the Latch Application API.
///
/// # Example
///
/// ```no_run
/// use rustlatch_client::{LatchClient, Transport};
/// use rustlatch_core::LatchConfig;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = Transport::new(LatchConfig::default())?;
/// let latch = LatchClient::new("MyAppID", "MySecretKey", transport);
///
/// let paired = latch.pair("a1b2c3").await?;
/// let status = latch.status(paired.account_id(), false, false).await?;
/// println!("latch is {:?}", status.status());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LatchClient {
    credential: Credential,
    transport: Transport,
}

impl LatchClient {
    /// Create a client for `app_id` using `transport`.
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>, transport: Transport) -> Self {
        Self {
            credential: Credential::new(app_id, secret_key),
            transport,
        }
    }

    /// Create a client from the application credentials in `config`.
    ///
    /// # Errors
    ///
    /// Fails if the credentials are missing or the transport cannot be built.
    pub fn from_config(config: LatchConfig) -> ClientResult<Self> {
        let (app_id, secret) = config.app_credentials()?;
        let credential = Credential::new(app_id, secret);
        Ok(Self {
            credential,
            transport: Transport::new(config)?,
        })
    }

    /// The signing credential.
    #[must_use]
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// The underlying transport.
    #[must_use]
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Pair an account using the token shown in the user's Latch app.
    pub async fn pair(&self, token: &str) -> ClientResult<PairResponse> {
        self.get(&action_path(action::PAIR, &[token])?, ResponseKind::Pair)
            .await
    }

    /// Pair an account by its known account ID.
    pub async fn pair_with_id(&self, account_id: &str) -> ClientResult<PairResponse> {
        self.get(
            &action_path(action::PAIR_WITH_ID, &[account_id])?,
            ResponseKind::Pair,
        )
        .await
    }

    /// Unpair an account.
    pub async fn unpair(&self, account_id: &str) -> ClientResult<()> {
        self.get_empty(&action_path(action::UNPAIR, &[account_id])?)
            .await
    }

    /// Lock an account.
    pub async fn lock(&self, account_id: &str) -> ClientResult<()> {
        self.get_empty(&account_path(action::LOCK, account_id, None)?)
            .await
    }

    /// Unlock an account.
    pub async fn unlock(&self, account_id: &str) -> ClientResult<()> {
        self.get_empty(&account_path(action::UNLOCK, account_id, None)?)
            .await
    }

    /// Lock one operation of an account.
    pub async fn lock_operation(&self, account_id: &str, operation_id: &str) -> ClientResult<()> {
        self.get_empty(&account_path(action::LOCK, account_id, Some(operation_id))?)
            .await
    }

    /// Unlock one operation of an account.
    pub async fn unlock_operation(&self, account_id: &str, operation_id: &str) -> ClientResult<()> {
        self.get_empty(&account_path(action::UNLOCK, account_id, Some(operation_id))?)
            .await
    }

    /// Status of an account.
    ///
    /// With `nootp` the one-time password is left out of the response; with
    /// `silent` no push notification is sent to the user.
    pub async fn status(
        &self,
        account_id: &str,
        nootp: bool,
        silent: bool,
    ) -> ClientResult<StatusResponse> {
        self.get(
            &status_path(account_id, None, nootp, silent)?,
            ResponseKind::Status,
        )
        .await
    }

    /// Status of one operation of an account.
    pub async fn operation_status(
        &self,
        account_id: &str,
        operation_id: &str,
        nootp: bool,
        silent: bool,
    ) -> ClientResult<StatusResponse> {
        self.get(
            &status_path(account_id, Some(operation_id), nootp, silent)?,
            ResponseKind::Status,
        )
        .await
    }

    /// Account history between `from` and `to`.
    pub async fn history(
        &self,
        account_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> ClientResult<HistoryResponse> {
        self.get(&history_path(account_id, from, to)?, ResponseKind::History)
            .await
    }

    /// Add an operation under `parent_id` (an application or operation ID).
    pub async fn add_operation(
        &self,
        parent_id: &str,
        name: &str,
        two_factor: TwoFactorPolicy,
        lock_on_request: TwoFactorPolicy,
    ) -> ClientResult<AddOperationResponse> {
        let mut params = FormParams::new();
        params.insert(param::PARENT_ID.to_owned(), vec![parent_id.to_owned()]);
        params.insert(param::NAME.to_owned(), vec![name.to_owned()]);
        params.insert(param::TWO_FACTOR.to_owned(), vec![two_factor.to_string()]);
        params.insert(
            param::LOCK_ON_REQUEST.to_owned(),
            vec![lock_on_request.to_string()],
        );

        let response = self
            .transport
            .call(
                &self.credential,
                HttpMethod::Put,
                action::OPERATION,
                params,
                ResponseKind::AddOperation,
            )
            .await?;
        Ok(AddOperationResponse::try_from(response)?)
    }

    /// Update an operation. Policies left as `None` keep their current value.
    pub async fn update_operation(
        &self,
        operation_id: &str,
        name: &str,
        two_factor: Option<TwoFactorPolicy>,
        lock_on_request: Option<TwoFactorPolicy>,
    ) -> ClientResult<()> {
        let mut params = FormParams::new();
        params.insert(param::NAME.to_owned(), vec![name.to_owned()]);
        if let Some(policy) = two_factor {
            params.insert(param::TWO_FACTOR.to_owned(), vec![policy.to_string()]);
        }
        if let Some(policy) = lock_on_request {
            params.insert(param::LOCK_ON_REQUEST.to_owned(), vec![policy.to_string()]);
        }

        self.transport
            .call(
                &self.credential,
                HttpMethod::Post,
                &action_path(action::OPERATION, &[operation_id])?,
                params,
                ResponseKind::Empty,
            )
            .await?;
        Ok(())
    }

    /// Delete an operation.
    pub async fn delete_operation(&self, operation_id: &str) -> ClientResult<()> {
        self.transport
            .call(
                &self.credential,
                HttpMethod::Delete,
                &action_path(action::OPERATION, &[operation_id])?,
                FormParams::new(),
                ResponseKind::Empty,
            )
            .await?;
        Ok(())
    }

    /// Show one operation, or every operation of the application when
    /// `operation_id` is `None`.
    pub async fn show_operation(
        &self,
        operation_id: Option<&str>,
    ) -> ClientResult<ShowOperationResponse> {
        let path = match operation_id {
            Some(id) => action_path(action::OPERATION, &[id])?,
            None => action::OPERATION.to_owned(),
        };
        self.get(&path, ResponseKind::ShowOperation).await
    }

    async fn get<T>(&self, path: &str, kind: ResponseKind) -> ClientResult<T>
    where
        T: TryFrom<LatchResponse, Error = ModelError>,
    {
        let response = self
            .transport
            .call(&self.credential, HttpMethod::Get, path, FormParams::new(), kind)
            .await?;
        Ok(T::try_from(response)?)
    }

    async fn get_empty(&self, path: &str) -> ClientResult<()> {
        self.transport
            .call(
                &self.credential,
                HttpMethod::Get,
                path,
                FormParams::new(),
                ResponseKind::Empty,
            )
            .await?;
        Ok(())
    }
}

/// `{action}/{account}` or `{action}/{account}/op/{operation}`.
fn account_path(
    action_name: &str,
    account_id: &str,
    operation_id: Option<&str>,
) -> ClientResult<String> {
    let mut path = action_path(action_name, &[account_id])?;
    if let Some(op) = operation_id {
        path.push('/');
        path.push_str(&action_path(action::OPERATION_SEGMENT, &[op])?);
    }
    Ok(path)
}

fn status_path(
    account_id: &str,
    operation_id: Option<&str>,
    nootp: bool,
    silent: bool,
) -> ClientResult<String> {
    let mut path = account_path(action::CHECK_STATUS, account_id, operation_id)?;
    if nootp {
        path.push('/');
        path.push_str(action::NOOTP_SUFFIX);
    }
    if silent {
        path.push('/');
        path.push_str(action::SILENT_SUFFIX);
    }
    Ok(path)
}

/// History bounds are sent as milliseconds since the epoch.
fn history_path(
    account_id: &str,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> ClientResult<String> {
    Ok(format!(
        "{}/{}/{}",
        action_path(action::HISTORY, &[account_id])?,
        from.timestamp_millis(),
        to.timestamp_millis()
    ))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rustlatch_auth::{RequestDescriptor, verify_authorization};

    use super::*;
    use crate::error::ClientError;
    use crate::test_support::{
        CapturedRequest, counting_observer, fixed_time, serve_once, transport_for,
    };

    #[test]
    fn test_should_build_status_paths_with_suffixes() {
        assert_eq!(status_path("acc", None, false, false).unwrap(), "status/acc");
        assert_eq!(
            status_path("acc", None, true, true).unwrap(),
            "status/acc/nootp/silent"
        );
        assert_eq!(
            status_path("acc", Some("op1"), false, true).unwrap(),
            "status/acc/op/op1/silent"
        );
    }

    #[test]
    fn test_should_build_lock_paths() {
        assert_eq!(account_path(action::LOCK, "acc", None).unwrap(), "lock/acc");
        assert_eq!(
            account_path(action::UNLOCK, "acc", Some("op1")).unwrap(),
            "unlock/acc/op/op1"
        );
    }

    #[test]
    fn test_should_send_history_bounds_in_milliseconds() {
        let from = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2015, 1, 2, 0, 0, 0).unwrap();
        assert_eq!(
            history_path("acc", from, to).unwrap(),
            "history/acc/1420070400000/1420156800000"
        );
    }

    #[tokio::test]
    async fn test_should_pair_with_signed_get_request() {
        let (base, server) = serve_once(200, r#"{"data":{"accountId":"MyAccountId"}}"#).await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        let paired = client.pair("my_token").await.unwrap();
        assert_eq!(paired.account_id(), "MyAccountId");

        let captured = server.await.unwrap();
        assert_eq!(captured.method, "GET");
        assert_eq!(captured.target, "/api/1.0/pair/my_token");
        assert_eq!(captured.header("x-11paths-date"), Some("2015-02-15 14:53:00"));
        assert!(captured.body.is_empty());

        let descriptor = RequestDescriptor::builder(
            HttpMethod::Get,
            format!("{base}{}", captured.target),
            fixed_time(),
        )
        .build()
        .unwrap();
        let auth = captured.header("authorization").unwrap();
        assert!(verify_authorization(client.credential(), &descriptor, auth).is_ok());
    }

    #[tokio::test]
    async fn test_should_send_add_operation_as_signed_put_form() {
        let (base, server) = serve_once(200, r#"{"data":{"operationId":"NewOp"}}"#).await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        let added = client
            .add_operation(
                "MyAppID",
                "Transfer funds",
                TwoFactorPolicy::Mandatory,
                TwoFactorPolicy::Disabled,
            )
            .await
            .unwrap();
        assert_eq!(added.operation_id(), "NewOp");

        let captured = server.await.unwrap();
        assert_eq!(captured.method, "PUT");
        assert_eq!(captured.target, "/api/1.0/operation");
        assert_eq!(
            captured.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            captured.body,
            "lock_on_request=DISABLED&name=Transfer+funds&parentId=MyAppID&two_factor=MANDATORY"
        );

        let descriptor = RequestDescriptor::builder(
            HttpMethod::Put,
            format!("{base}{}", captured.target),
            fixed_time(),
        )
        .params([
            ("parentId", vec!["MyAppID"]),
            ("name", vec!["Transfer funds"]),
            ("two_factor", vec!["MANDATORY"]),
            ("lock_on_request", vec!["DISABLED"]),
        ])
        .build()
        .unwrap();
        let auth = captured.header("authorization").unwrap();
        assert!(verify_authorization(client.credential(), &descriptor, auth).is_ok());
    }

    #[tokio::test]
    async fn test_should_omit_unset_policies_on_update() {
        let (base, server) = serve_once(200, "{}").await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        client
            .update_operation("op1", "Renamed", None, Some(TwoFactorPolicy::OptIn))
            .await
            .unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured.method, "POST");
        assert_eq!(captured.target, "/api/1.0/operation/op1");
        assert_eq!(captured.body, "lock_on_request=OPT_IN&name=Renamed");
    }

    #[tokio::test]
    async fn test_should_send_delete_without_body() {
        let (base, server) = serve_once(200, "{}").await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        client.delete_operation("op1").await.unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured.method, "DELETE");
        assert!(captured.body.is_empty());
        assert!(captured.header("content-type").is_none());
    }

    #[tokio::test]
    async fn test_should_surface_already_paired_error() {
        let (base, server) = serve_once(
            200,
            r#"{"error":{"code":205,"message":"Account and application already paired"}}"#,
        )
        .await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        let err = client.pair("my_token").await.unwrap_err();
        assert_eq!(err.api_code(), Some(205));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_should_report_rejected_signature_as_status_error() {
        let (base, server) = serve_once(401, r#"{"error":"unauthorized"}"#).await;
        let client = LatchClient::new("MyAppID", "WrongSecret", transport_for(&base));

        let err = client.lock("acc").await.unwrap_err();
        assert!(matches!(err, ClientError::Status { .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_should_notify_observers_around_each_call() {
        let (base, server) = serve_once(
            200,
            r#"{"data":{"operations":{"MyAppID":{"status":"off"}}}}"#,
        )
        .await;
        let observer = counting_observer();
        let transport = transport_for(&base).with_observer(observer.clone());
        let client = LatchClient::new("MyAppID", "MySecretKey", transport);

        let status = client.status("acc", true, false).await.unwrap();
        assert_eq!(status.status(), Some(rustlatch_model::LatchStatus::Off));

        let captured = server.await.unwrap();
        assert_eq!(captured.target, "/api/1.0/status/acc/nootp");
        assert_eq!(observer.started.load(std::sync::atomic::Ordering::Relaxed), 1);
        assert_eq!(observer.received.load(std::sync::atomic::Ordering::Relaxed), 1);
    }

    /// Rebuild the descriptor from what the server received and check the
    /// signature covers exactly that target.
    fn assert_signed_as_received(
        client: &LatchClient,
        base: &str,
        method: HttpMethod,
        captured: &CapturedRequest,
    ) {
        let descriptor =
            RequestDescriptor::builder(method, format!("{base}{}", captured.target), fixed_time())
                .build()
                .unwrap();
        assert_eq!(descriptor.path_and_query(), captured.target);
        let auth = captured.header("authorization").unwrap();
        assert!(verify_authorization(client.credential(), &descriptor, auth).is_ok());
    }

    #[tokio::test]
    async fn test_should_escape_awkward_pairing_token() {
        let (base, server) = serve_once(200, r#"{"data":{"accountId":"acc"}}"#).await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        client.pair(r#"a{b}"c/.."#).await.unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured.target, "/api/1.0/pair/a%7Bb%7D%22c%2F..");
        assert_signed_as_received(&client, &base, HttpMethod::Get, &captured);
    }

    #[tokio::test]
    async fn test_should_escape_awkward_ids_in_operation_lock() {
        let (base, server) = serve_once(200, "{}").await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        client.lock_operation("acc{1}", r#"op"/.."#).await.unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured.target, "/api/1.0/lock/acc%7B1%7D/op/op%22%2F..");
        assert_signed_as_received(&client, &base, HttpMethod::Get, &captured);
    }

    #[tokio::test]
    async fn test_should_escape_awkward_ids_before_status_suffixes() {
        let (base, server) = serve_once(
            200,
            r#"{"data":{"operations":{"op":{"status":"on"}}}}"#,
        )
        .await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        client
            .operation_status("x'y z", "..%2F", true, true)
            .await
            .unwrap();

        let captured = server.await.unwrap();
        assert_eq!(
            captured.target,
            "/api/1.0/status/x%27y%20z/op/..%252F/nootp/silent"
        );
        assert_signed_as_received(&client, &base, HttpMethod::Get, &captured);
    }

    #[tokio::test]
    async fn test_should_escape_awkward_account_in_history() {
        let (base, server) = serve_once(200, r#"{"data":{}}"#).await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));
        let from = DateTime::from_timestamp_millis(0).unwrap();
        let to = DateTime::from_timestamp_millis(1000).unwrap();

        client.history("ñ?q#f", from, to).await.unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured.target, "/api/1.0/history/%C3%B1%3Fq%23f/0/1000");
        assert_signed_as_received(&client, &base, HttpMethod::Get, &captured);
    }

    #[tokio::test]
    async fn test_should_escape_awkward_operation_id_on_delete() {
        let (base, server) = serve_once(200, "{}").await;
        let client = LatchClient::new("MyAppID", "MySecretKey", transport_for(&base));

        client.delete_operation("{op}").await.unwrap();

        let captured = server.await.unwrap();
        assert_eq!(captured.method, "DELETE");
        assert_eq!(captured.target, "/api/1.0/operation/%7Bop%7D");
        assert_signed_as_received(&client, &base, HttpMethod::Delete, &captured);
    }

    #[tokio::test]
    async fn test_should_reject_dot_segment_ids_without_sending() {
        let client = LatchClient::new(
            "MyAppID",
            "MySecretKey",
            transport_for("http://127.0.0.1:9"),
        );

        let err = client.unpair("..").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidPathSegment(id) if id == ".."));
        let err = client.lock_operation("acc", "").await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidPathSegment(_)));
    }
}
