//! Integration tests for RustLatch against a live Latch service.
//!
//! These tests need real credentials in the environment (`LATCH_APP_ID`,
//! `LATCH_SECRET_KEY`, and for the User API `LATCH_USER_ID`,
//! `LATCH_USER_SECRET`). Tests touching an account also need
//! `LATCH_TEST_ACCOUNT_ID` set to an account paired with the application.
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p rustlatch-integration -- --ignored
//! ```

use std::sync::Once;

use rustlatch_client::{LatchClient, LatchUserClient};
use rustlatch_core::LatchConfig;

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

fn config() -> LatchConfig {
    init_tracing();
    LatchConfig::from_env().unwrap_or_else(|e| panic!("invalid Latch configuration: {e}"))
}

/// Application API client built from the environment.
#[must_use]
pub fn app_client() -> LatchClient {
    LatchClient::from_config(config())
        .unwrap_or_else(|e| panic!("failed to build application client: {e}"))
}

/// User API client built from the environment.
#[must_use]
pub fn user_client() -> LatchUserClient {
    LatchUserClient::from_config(config())
        .unwrap_or_else(|e| panic!("failed to build user client: {e}"))
}

/// Account paired with the test application.
#[must_use]
pub fn test_account_id() -> String {
    std::env::var("LATCH_TEST_ACCOUNT_ID")
        .unwrap_or_else(|_| panic!("LATCH_TEST_ACCOUNT_ID is not set"))
}

/// Unique name for resources created by a test.
#[must_use]
pub fn test_resource_name(prefix: &str) -> String {
    let stamp = chrono::Utc::now().timestamp_millis();
    format!("rustlatch-{prefix}-{stamp}")
}

mod test_application;
mod test_operation;
mod test_user;
