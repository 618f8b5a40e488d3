//! Command-line arguments.

use chrono::{DateTime, NaiveDateTime, Utc};
use clap::{Parser, Subcommand};
use rustlatch_core::protocol::UTC_DATE_FORMAT;
use rustlatch_model::TwoFactorPolicy;

/// Latch command-line client.
///
/// Credentials and endpoint settings are read from the environment; the
/// flags below override the endpoint settings only.
#[derive(Debug, Parser)]
#[command(name = "rustlatch", version)]
#[command(about = "Sign requests and call the Latch Application and User APIs")]
pub struct Cli {
    /// Base URL of the Latch service (overrides LATCH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Proxy URL for all requests (overrides LATCH_PROXY)
    #[arg(long, global = true)]
    pub proxy: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the signed headers for a request without sending it
    Sign(SignArgs),

    /// Pair an account using a pairing token
    Pair {
        /// Token shown in the user's Latch app
        token: String,
    },

    /// Pair an account by its account ID
    PairWithId {
        /// Account ID
        account_id: String,
    },

    /// Unpair an account
    Unpair {
        /// Account ID
        account_id: String,
    },

    /// Check the latch status of an account or one of its operations
    Status {
        /// Account ID
        account_id: String,

        /// Operation ID
        #[arg(short, long)]
        operation: Option<String>,

        /// Do not generate a one-time password
        #[arg(long)]
        nootp: bool,

        /// Do not send a push notification
        #[arg(long)]
        silent: bool,
    },

    /// Lock an account or one of its operations
    Lock {
        /// Account ID
        account_id: String,

        /// Operation ID
        #[arg(short, long)]
        operation: Option<String>,
    },

    /// Unlock an account or one of its operations
    Unlock {
        /// Account ID
        account_id: String,

        /// Operation ID
        #[arg(short, long)]
        operation: Option<String>,
    },

    /// Show the history of an account
    History {
        /// Account ID
        account_id: String,

        /// Start of the range, milliseconds since the epoch
        #[arg(long, default_value = "0")]
        from_ms: i64,

        /// End of the range, milliseconds since the epoch (defaults to now)
        #[arg(long)]
        to_ms: Option<i64>,
    },

    /// Manage operations of the application
    #[command(subcommand)]
    Operation(OperationCommand),

    /// Show the subscription of the developer account (User API)
    Subscription,

    /// Manage applications of the developer account (User API)
    #[command(subcommand)]
    Application(ApplicationCommand),
}

/// Offline signing input.
#[derive(Debug, clap::Args)]
pub struct SignArgs {
    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET")]
    pub method: String,

    /// Absolute request URL
    pub url: String,

    /// Request date as "YYYY-MM-DD HH:MM:SS" in UTC (defaults to now)
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<DateTime<Utc>>,

    /// Custom header as "Name: value" (repeatable)
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Form parameter as "name=value" (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Sign with the user credentials instead of the application ones
    #[arg(long)]
    pub user: bool,
}

/// Operation management commands.
#[derive(Debug, Subcommand)]
pub enum OperationCommand {
    /// Add an operation
    Add {
        /// Parent application or operation ID
        parent_id: String,

        /// Operation name
        name: String,

        /// Two-factor policy
        #[arg(long, default_value = "DISABLED")]
        two_factor: TwoFactorPolicy,

        /// Lock-on-request policy
        #[arg(long, default_value = "DISABLED")]
        lock_on_request: TwoFactorPolicy,
    },

    /// Update an operation
    Update {
        /// Operation ID
        operation_id: String,

        /// New operation name
        name: String,

        /// Two-factor policy
        #[arg(long)]
        two_factor: Option<TwoFactorPolicy>,

        /// Lock-on-request policy
        #[arg(long)]
        lock_on_request: Option<TwoFactorPolicy>,
    },

    /// Delete an operation
    Delete {
        /// Operation ID
        operation_id: String,
    },

    /// Show one operation, or all of them
    Show {
        /// Operation ID
        operation_id: Option<String>,
    },
}

/// Application management commands.
#[derive(Debug, Subcommand)]
pub enum ApplicationCommand {
    /// List applications
    List,

    /// Add an application
    Add(ApplicationArgs),

    /// Update an application
    Update {
        /// Application ID
        application_id: String,

        #[command(flatten)]
        info: ApplicationArgs,
    },

    /// Delete an application
    Delete {
        /// Application ID
        application_id: String,
    },
}

/// Application attributes.
#[derive(Debug, Clone, clap::Args)]
pub struct ApplicationArgs {
    /// Application name
    pub name: String,

    /// Contact email
    #[arg(long, default_value = "")]
    pub contact_email: String,

    /// Contact phone
    #[arg(long, default_value = "")]
    pub contact_phone: String,

    /// Two-factor policy
    #[arg(long, default_value = "DISABLED")]
    pub two_factor: TwoFactorPolicy,

    /// Lock-on-request policy
    #[arg(long, default_value = "DISABLED")]
    pub lock_on_request: TwoFactorPolicy,
}

fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDateTime::parse_from_str(s, UTC_DATE_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("expected \"YYYY-MM-DD HH:MM:SS\": {e}"))
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {s:?}"))?;
    Ok((name.trim().to_owned(), value.trim_start().to_owned()))
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected \"name=value\", got {s:?}"))?;
    Ok((name.to_owned(), value.to_owned()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_should_parse_protocol_date() {
        assert_eq!(
            parse_date("2015-02-15 14:53:00").unwrap(),
            Utc.with_ymd_and_hms(2015, 2, 15, 14, 53, 0).unwrap()
        );
        assert!(parse_date("2015-02-15T14:53:00Z").is_err());
    }

    #[test]
    fn test_should_parse_header_and_param_pairs() {
        assert_eq!(
            parse_header("X-11paths-A: some value").unwrap(),
            ("X-11paths-A".to_owned(), "some value".to_owned())
        );
        assert!(parse_header("no colon").is_err());
        assert_eq!(
            parse_param("B[]=a=b").unwrap(),
            ("B[]".to_owned(), "a=b".to_owned())
        );
    }

    #[test]
    fn test_should_parse_nested_subcommands() {
        let cli = Cli::try_parse_from([
            "rustlatch",
            "operation",
            "add",
            "app",
            "Transfer",
            "--two-factor",
            "opt-in",
        ])
        .unwrap();
        match cli.command {
            Command::Operation(OperationCommand::Add { two_factor, .. }) => {
                assert_eq!(two_factor, TwoFactorPolicy::OptIn);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_should_verify_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
