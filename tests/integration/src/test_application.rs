//! Application API integration tests: pairing, status and locks.

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rustlatch_client::ClientError;
    use rustlatch_model::LatchStatus;

    use crate::{app_client, test_account_id};

    #[tokio::test]
    #[ignore = "requires Latch credentials"]
    async fn test_should_reject_unknown_pairing_token() {
        let client = app_client();

        let err = client
            .pair("zzzzzz")
            .await
            .expect_err("pairing with a bogus token should fail");

        assert!(
            err.api_code().is_some(),
            "expected an embedded Latch error, got {err:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires Latch credentials"]
    async fn test_should_reject_wrong_secret_at_http_level() {
        let mut config = rustlatch_core::LatchConfig::from_env().unwrap();
        config.secret_key = Some("not-the-secret".to_owned());
        let client = rustlatch_client::LatchClient::from_config(config).unwrap();

        let result = client.status(&test_account_id(), true, true).await;

        assert!(
            matches!(
                result,
                Err(ClientError::Status { .. } | ClientError::Api(_))
            ),
            "bad signature should be refused, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires Latch credentials and a paired account"]
    async fn test_should_toggle_account_lock() {
        let client = app_client();
        let account = test_account_id();

        client.lock(&account).await.unwrap();
        let status = client.status(&account, true, true).await.unwrap();
        assert_eq!(status.status(), Some(LatchStatus::Off));

        client.unlock(&account).await.unwrap();
        let status = client.status(&account, true, true).await.unwrap();
        assert_eq!(status.status(), Some(LatchStatus::On));
    }

    #[tokio::test]
    #[ignore = "requires Latch credentials and a paired account"]
    async fn test_should_fetch_recent_history() {
        let client = app_client();
        let account = test_account_id();
        let to = Utc::now();
        let from = to - Duration::days(1);

        let history = client.history(&account, from, to).await.unwrap();
        let app_id = client.credential().id();
        assert!(history.application(app_id).is_some());
    }
}
