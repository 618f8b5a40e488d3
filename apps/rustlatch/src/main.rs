//! RustLatch CLI - sign requests and call the Latch APIs from the shell.
//!
//! Responses are printed to stdout as pretty JSON; logs go to stderr.
//!
//! # Usage
//!
//! ```text
//! LATCH_APP_ID=... LATCH_SECRET_KEY=... rustlatch status <account-id> --nootp
//! LATCH_USER_ID=... LATCH_USER_SECRET=... rustlatch application list
//! rustlatch sign -X POST https://latch.elevenpaths.com/api/1.0/operation -p name=Test
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `LATCH_APP_ID` | *(unset)* | Application ID for Application API calls |
//! | `LATCH_SECRET_KEY` | *(unset)* | Application secret |
//! | `LATCH_USER_ID` | *(unset)* | User ID for User API calls |
//! | `LATCH_USER_SECRET` | *(unset)* | User secret |
//! | `LATCH_API_URL` | `https://latch.elevenpaths.com` | Service base URL |
//! | `LATCH_API_VERSION` | `1.0` | API version path segment |
//! | `LATCH_PROXY` | *(unset)* | Proxy URL |
//! | `LATCH_TIMEOUT_SECS` | `30` | Request timeout |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

mod cli;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use clap::Parser;
use rustlatch_auth::canonical::string_to_sign;
use rustlatch_auth::{Credential, HttpMethod, RequestDescriptor, sign_request};
use rustlatch_client::{LatchClient, LatchUserClient};
use rustlatch_core::LatchConfig;
use rustlatch_core::protocol::is_protocol_header;
use rustlatch_model::ApplicationInfo;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{ApplicationArgs, ApplicationCommand, Cli, Command, OperationCommand, SignArgs};

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to render response")?;
    println!("{json}");
    Ok(())
}

fn print_done(action: &str) -> Result<()> {
    print_json(&serde_json::json!({ "ok": true, "action": action }))
}

impl From<ApplicationArgs> for ApplicationInfo {
    fn from(args: ApplicationArgs) -> Self {
        Self {
            name: args.name,
            contact_email: args.contact_email,
            contact_phone: args.contact_phone,
            two_factor: args.two_factor,
            lock_on_request: args.lock_on_request,
        }
    }
}

fn sign(config: &LatchConfig, args: SignArgs) -> Result<()> {
    let (id, secret) = if args.user {
        config.user_credentials()?
    } else {
        config.app_credentials()?
    };
    let credential = Credential::new(id, secret);

    let method: HttpMethod = args.method.parse()?;
    let timestamp = args.date.unwrap_or_else(Utc::now);
    for (name, _) in args.headers.iter().filter(|(name, _)| !is_protocol_header(name)) {
        warn!(header = %name, "custom header lacks the X-11Paths- prefix");
    }
    let mut builder = RequestDescriptor::builder(method, args.url, timestamp).headers(args.headers);
    for (name, value) in args.params {
        builder = builder.param(name, value);
    }
    let descriptor = builder.build()?;

    let signed = sign_request(&credential, &descriptor);
    let headers: serde_json::Map<String, serde_json::Value> = signed
        .header_pairs()
        .into_iter()
        .map(|(name, value)| (name.to_owned(), value.into()))
        .collect();

    print_json(&serde_json::json!({
        "string_to_sign": string_to_sign(&descriptor),
        "headers": headers,
        "body": signed.body,
    }))
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).with_context(|| format!("timestamp out of range: {ms}"))
}

async fn run_app(config: LatchConfig, command: Command) -> Result<()> {
    let latch = LatchClient::from_config(config)?;

    match command {
        Command::Pair { token } => print_json(&latch.pair(&token).await?),
        Command::PairWithId { account_id } => print_json(&latch.pair_with_id(&account_id).await?),
        Command::Unpair { account_id } => {
            latch.unpair(&account_id).await?;
            print_done("unpair")
        }
        Command::Status {
            account_id,
            operation,
            nootp,
            silent,
        } => {
            let status = match operation {
                Some(op) => {
                    latch
                        .operation_status(&account_id, &op, nootp, silent)
                        .await?
                }
                None => latch.status(&account_id, nootp, silent).await?,
            };
            print_json(&status)
        }
        Command::Lock {
            account_id,
            operation,
        } => {
            match operation {
                Some(op) => latch.lock_operation(&account_id, &op).await?,
                None => latch.lock(&account_id).await?,
            }
            print_done("lock")
        }
        Command::Unlock {
            account_id,
            operation,
        } => {
            match operation {
                Some(op) => latch.unlock_operation(&account_id, &op).await?,
                None => latch.unlock(&account_id).await?,
            }
            print_done("unlock")
        }
        Command::History {
            account_id,
            from_ms,
            to_ms,
        } => {
            let from = from_millis(from_ms)?;
            let to = from_millis(to_ms.unwrap_or_else(now_millis))?;
            print_json(&latch.history(&account_id, from, to).await?)
        }
        Command::Operation(op) => run_operation(&latch, op).await,
        Command::Sign(_) | Command::Subscription | Command::Application(_) => {
            bail!("not an Application API command")
        }
    }
}

async fn run_operation(latch: &LatchClient, command: OperationCommand) -> Result<()> {
    match command {
        OperationCommand::Add {
            parent_id,
            name,
            two_factor,
            lock_on_request,
        } => print_json(
            &latch
                .add_operation(&parent_id, &name, two_factor, lock_on_request)
                .await?,
        ),
        OperationCommand::Update {
            operation_id,
            name,
            two_factor,
            lock_on_request,
        } => {
            latch
                .update_operation(&operation_id, &name, two_factor, lock_on_request)
                .await?;
            print_done("update operation")
        }
        OperationCommand::Delete { operation_id } => {
            latch.delete_operation(&operation_id).await?;
            print_done("delete operation")
        }
        OperationCommand::Show { operation_id } => {
            print_json(&latch.show_operation(operation_id.as_deref()).await?)
        }
    }
}

async fn run_user(config: LatchConfig, command: Option<ApplicationCommand>) -> Result<()> {
    let user = LatchUserClient::from_config(config)?;

    match command {
        None => print_json(&user.subscription().await?),
        Some(ApplicationCommand::List) => print_json(&user.show_applications().await?),
        Some(ApplicationCommand::Add(args)) => {
            print_json(&user.add_application(&args.into()).await?)
        }
        Some(ApplicationCommand::Update {
            application_id,
            info,
        }) => {
            user.update_application(&application_id, &info.into()).await?;
            print_done("update application")
        }
        Some(ApplicationCommand::Delete { application_id }) => {
            user.delete_application(&application_id).await?;
            print_done("delete application")
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&LatchConfig::log_level_from_env())?;

    let mut config = LatchConfig::from_env().context("failed to load Latch configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if cli.proxy.is_some() {
        config.proxy = cli.proxy;
    }

    info!(api_url = %config.api_url, api_version = %config.api_version, "rustlatch starting");

    match cli.command {
        Command::Sign(args) => sign(&config, args),
        Command::Subscription => run_user(config, None).await,
        Command::Application(app) => run_user(config, Some(app)).await,
        command => run_app(config, command).await,
    }
}
