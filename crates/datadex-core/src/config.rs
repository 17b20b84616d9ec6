// ── Runtime client configuration ──
//
// These types describe how to reach the catalog and which optional
// features the deployment has switched on. They carry credential data and
// tuning, but never touch disk. The CLI builds a `ClientConfig` (usually
// via `datadex-config`) and hands it to the `Store`.

use std::time::Duration;

use datadex_api::{Credentials, TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// How to authenticate with the catalog frontend.
#[derive(Debug, Clone, Default)]
pub enum AuthCredentials {
    /// No credentials.
    #[default]
    None,
    /// Bearer token sent as `Authorization: Bearer ...`.
    Token(SecretString),
    /// Arbitrary header, typically a proxy session cookie.
    Header { name: String, value: SecretString },
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed staging deployments).
    DangerAcceptInvalid,
}

/// Deployment feature switches that change coordinator behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct FeatureFlags {
    /// Email owners on ownership changes, metadata requests, and new issues.
    pub notifications_enabled: bool,
    /// Dashboards are indexed (search + bookmark tabs).
    pub index_dashboards: bool,
    /// Users are indexed (people search).
    pub index_users: bool,
    /// An issue tracker is wired up.
    pub issue_tracking: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            notifications_enabled: false,
            index_dashboards: false,
            index_users: true,
            issue_tracking: false,
        }
    }
}

/// Configuration for one catalog deployment.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Frontend service URL (e.g., `https://catalog.example.com`).
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
    pub features: FeatureFlags,
    /// How long a feedback confirmation stays visible before resetting.
    pub feedback_reset_delay: Duration,
    /// Quiet period before an inline search query is sent.
    pub inline_search_debounce: Duration,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_FEEDBACK_RESET_DELAY: Duration = Duration::from_secs(2);
    pub const DEFAULT_INLINE_SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

    /// Config with defaults for everything but the URL.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            auth: AuthCredentials::None,
            tls: TlsVerification::default(),
            timeout: Self::DEFAULT_TIMEOUT,
            features: FeatureFlags::default(),
            feedback_reset_delay: Self::DEFAULT_FEEDBACK_RESET_DELAY,
            inline_search_debounce: Self::DEFAULT_INLINE_SEARCH_DEBOUNCE,
        }
    }

    /// Translate into the api crate's transport settings.
    pub fn transport(&self) -> TransportConfig {
        let tls = match &self.tls {
            TlsVerification::SystemDefaults => TlsMode::System,
            TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
        };
        let credentials = match &self.auth {
            AuthCredentials::None => Credentials::Anonymous,
            AuthCredentials::Token(token) => Credentials::Bearer {
                token: token.clone(),
            },
            AuthCredentials::Header { name, value } => Credentials::Header {
                name: name.clone(),
                value: value.clone(),
            },
        };
        TransportConfig {
            tls,
            timeout: self.timeout,
            credentials,
            cookie_jar: None,
        }
        .with_cookie_jar()
    }
}
