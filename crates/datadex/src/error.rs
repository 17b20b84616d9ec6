//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use datadex_config::ConfigError;
use datadex_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const TIMEOUT: i32 = 5;
    pub const CONFIG: i32 = 6;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not connect to the catalog at {url}: {reason}")]
    #[diagnostic(
        code(datadex::connection_failed),
        help(
            "Check that the catalog frontend is running and reachable.\n\
             URL: {url}\n\
             Self-signed certificate? Try: --insecure"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(datadex::auth_failed),
        help(
            "Verify your token.\n\
             Store a new one with: datadex config set-token"
        )
    )]
    AuthFailed { message: String },

    // ── Requests ─────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(datadex::not_found),
        help("Run: datadex search {identifier}")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("'{operation}' failed{}", .status.map_or_else(String::new, |s| format!(" (HTTP {s})")))]
    #[diagnostic(
        code(datadex::request_failed),
        help("Re-run with -vv to see the catalog's response.")
    )]
    RequestFailed {
        operation: String,
        status: Option<u16>,
    },

    #[error("API error: {message}")]
    #[diagnostic(code(datadex::api_error))]
    ApiError { message: String },

    #[error("Timed out after {seconds}s")]
    #[diagnostic(
        code(datadex::timeout),
        help("Increase the limit with --timeout or check the catalog's responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(datadex::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(datadex::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: datadex config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No catalog URL configured")]
    #[diagnostic(
        code(datadex::no_config),
        help(
            "Create a profile with: datadex config init\n\
             Or pass --url / set DATADEX_URL.\n\
             Config expected at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(datadex::config))]
    Config(#[from] ConfigError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::AuthFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            Self::ProfileNotFound { .. } | Self::NoConfig { .. } | Self::Config(_) => {
                exit_code::CONFIG
            }
            Self::RequestFailed {
                status: Some(404), ..
            } => exit_code::NOT_FOUND,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => {
                CliError::ConnectionFailed { url, reason }
            }

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { waited } => CliError::Timeout {
                seconds: waited.as_secs(),
            },

            CoreError::NotFound { what } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier: what,
            },

            CoreError::InvalidTableKey { key } => CliError::Validation {
                field: "table key".into(),
                reason: format!("'{key}' is not database://cluster.schema/table"),
            },

            CoreError::Api { message, status: _ } => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::StoreClosed => CliError::ApiError {
                message: "the store shut down before the request settled".into(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn exit_codes_follow_the_documented_table() {
        let timeout: CliError = CoreError::Timeout {
            waited: Duration::from_secs(30),
        }
        .into();
        assert_eq!(timeout.exit_code(), exit_code::TIMEOUT);

        let missing = CliError::RequestFailed {
            operation: "get table".into(),
            status: Some(404),
        };
        assert_eq!(missing.exit_code(), exit_code::NOT_FOUND);

        let server = CliError::RequestFailed {
            operation: "get table".into(),
            status: Some(500),
        };
        assert_eq!(server.exit_code(), exit_code::GENERAL);
        assert_eq!(server.to_string(), "'get table' failed (HTTP 500)");

        let no_config = CliError::NoConfig {
            path: "/tmp/x".into(),
        };
        assert_eq!(no_config.exit_code(), exit_code::CONFIG);
    }
}
