// ── Core error types ──
//
// Errors surfaced by the store itself: building it, dispatching into it,
// and waiting on it. Feature operations never return these; their outcome
// lands in state as a Failure status. The `From<datadex_api::Error>` impl
// translates transport-layer errors into domain-appropriate variants.

use std::time::Duration;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach catalog at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Timed out after {waited:?}")]
    Timeout { waited: Duration },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("Invalid table key '{key}': expected database://cluster.schema/table")]
    InvalidTableKey { key: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Store lifecycle ──────────────────────────────────────────────
    #[error("Store has shut down")]
    StoreClosed,
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<datadex_api::Error> for CoreError {
    fn from(err: datadex_api::Error) -> Self {
        match err {
            datadex_api::Error::Authentication { message, .. } => {
                CoreError::AuthenticationFailed { message }
            }
            datadex_api::Error::Transport(ref e) => {
                if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            datadex_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            datadex_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            datadex_api::Error::InvalidHeader(msg) => CoreError::Config {
                message: format!("Invalid credentials: {msg}"),
            },
            datadex_api::Error::Service { status: 404, message } => {
                CoreError::NotFound { what: message }
            }
            datadex_api::Error::Service { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            datadex_api::Error::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected response body: {message}"),
                status: None,
            },
        }
    }
}
