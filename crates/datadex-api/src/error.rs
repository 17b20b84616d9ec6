use thiserror::Error;

/// Top-level error type for the `datadex-api` crate.
///
/// Covers every failure mode of the metadata, search, and mail services:
/// transport, authentication, service-reported errors, and malformed bodies.
/// `datadex-core` collapses these into a status-only failure descriptor
/// before anything reaches client state.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The service rejected the request credentials (HTTP 401/403).
    #[error("Authentication failed (HTTP {status}): {message}")]
    Authentication { status: u16, message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or HTTP client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// A credential value could not be encoded as an HTTP header.
    #[error("Invalid credential header: {0}")]
    InvalidHeader(String),

    // ── Service ─────────────────────────────────────────────────────
    /// Non-2xx response. `message` is the envelope's `msg` when the body
    /// carried one, otherwise the canonical reason phrase.
    #[error("Service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// HTTP status code associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. } | Self::Service { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Service { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the service rejected our credentials.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}
