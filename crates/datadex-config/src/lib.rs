//! Shared configuration for the datadex CLI.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), and
//! translation to `datadex_core::ClientConfig`. The CLI layers its
//! `GlobalOpts` overrides on top of what this crate resolves.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use datadex_core::{AuthCredentials, ClientConfig, FeatureFlags, TlsVerification};

const KEYRING_SERVICE: &str = "datadex";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("keyring error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named catalog profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named catalog deployment.
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct Profile {
    /// Frontend base URL (e.g., "https://catalog.example.com").
    pub url: String,

    /// Bearer token (plaintext; prefer keyring or env var).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Environment variable name containing the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_env: Option<String>,

    /// Send the token in this header verbatim instead of as a bearer
    /// token (e.g. "Cookie" behind an auth proxy).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_header: Option<String>,

    /// Path to custom CA certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,

    // Deployment feature switches; unset means the library default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notifications_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_dashboards: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_tracking: Option<bool>,
}

impl Config {
    /// Name of the profile to use when none is given explicitly.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                profile: name.into(),
            })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("", "", "datadex").map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("datadex");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file. A missing file yields the defaults.
///
/// `DATADEX_` variables override file values; `__` separates nesting,
/// so `DATADEX_PROFILES__PROD__URL` sets `profiles.prod.url`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("DATADEX_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    Ok(keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))?)
}

/// Store a profile's token in the system keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token)?;
    Ok(())
}

/// Resolve a profile's token from the credential chain.
///
/// Checks the env var named by `token_env`, then the system keyring,
/// then the plaintext `token`. `None` means anonymous access, which
/// catalogs behind a network boundary commonly allow.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Some(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring_entry(profile_name) {
        if let Ok(secret) = entry.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    profile.token.clone().map(SecretString::from)
}

/// Wrap a token in the credential shape the profile asks for.
pub fn auth_for(profile: &Profile, token: Option<SecretString>) -> AuthCredentials {
    match (token, &profile.auth_header) {
        (None, _) => AuthCredentials::None,
        (Some(token), None) => AuthCredentials::Token(token),
        (Some(value), Some(name)) => AuthCredentials::Header {
            name: name.clone(),
            value,
        },
    }
}

// ── Translation to the runtime config ───────────────────────────────

impl Profile {
    pub fn feature_flags(&self) -> FeatureFlags {
        let defaults = FeatureFlags::default();
        FeatureFlags {
            notifications_enabled: self
                .notifications_enabled
                .unwrap_or(defaults.notifications_enabled),
            index_dashboards: self.index_dashboards.unwrap_or(defaults.index_dashboards),
            index_users: self.index_users.unwrap_or(defaults.index_users),
            issue_tracking: self.issue_tracking.unwrap_or(defaults.issue_tracking),
        }
    }

    pub fn tls(&self) -> TlsVerification {
        if self.insecure.unwrap_or(false) {
            TlsVerification::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsVerification::CustomCa(ca_path.clone())
        } else {
            TlsVerification::SystemDefaults
        }
    }

    /// Build a `ClientConfig` from this profile without CLI overrides.
    pub fn to_client_config(&self, profile_name: &str) -> Result<ClientConfig, ConfigError> {
        let url: url::Url = self.url.parse().map_err(|_| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL: {}", self.url),
        })?;

        let mut config = ClientConfig::new(url);
        config.auth = auth_for(self, resolve_token(self, profile_name));
        config.tls = self.tls();
        config.timeout = Duration::from_secs(self.timeout.unwrap_or_else(default_timeout));
        config.features = self.feature_flags();
        Ok(config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    fn write(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.active_profile_name(), "default");
        assert_eq!(cfg.defaults, Defaults::default());
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn profiles_are_read_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            r#"
default_profile = "prod"

[defaults]
output = "json"

[profiles.prod]
url = "https://catalog.example.com"
token = "plain"
index_dashboards = true
"#,
        );
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.active_profile_name(), "prod");
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.color, "auto");

        let prod = cfg.profile("prod").unwrap();
        assert_eq!(prod.url, "https://catalog.example.com");
        assert!(prod.feature_flags().index_dashboards);
        assert!(prod.feature_flags().index_users);
        assert!(matches!(
            cfg.profile("staging"),
            Err(ConfigError::UnknownProfile { .. })
        ));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                url: "https://catalog.internal".into(),
                issue_tracking: Some(true),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, cfg.profiles);
    }

    #[test]
    fn unset_token_env_falls_back_to_plaintext() {
        let profile = Profile {
            url: "https://catalog.example.com".into(),
            token: Some("plain".into()),
            token_env: Some("DATADEX_TEST_TOKEN_NEVER_SET".into()),
            ..Profile::default()
        };
        let token = resolve_token(&profile, "datadex-test-no-such-profile").unwrap();
        assert_eq!(token.expose_secret(), "plain");
    }

    #[test]
    fn no_token_means_anonymous() {
        let profile = Profile::default();
        assert!(resolve_token(&profile, "datadex-test-no-such-profile").is_none());
    }

    #[test]
    fn header_auth_uses_profile_header_name() {
        let profile = Profile {
            auth_header: Some("Cookie".into()),
            ..Profile::default()
        };
        let auth = auth_for(&profile, Some(SecretString::from("session=abc")));
        match auth {
            AuthCredentials::Header { name, value } => {
                assert_eq!(name, "Cookie");
                assert_eq!(value.expose_secret(), "session=abc");
            }
            other => panic!("unexpected auth: {other:?}"),
        }
        assert!(matches!(auth_for(&profile, None), AuthCredentials::None));
    }

    #[test]
    fn client_config_carries_profile_settings() {
        let profile = Profile {
            url: "https://catalog.example.com".into(),
            insecure: Some(true),
            timeout: Some(5),
            notifications_enabled: Some(true),
            ..Profile::default()
        };
        let config = profile.to_client_config("datadex-test-no-such-profile").unwrap();
        assert_eq!(config.url.as_str(), "https://catalog.example.com/");
        assert_eq!(config.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.features.notifications_enabled);
    }

    #[test]
    fn invalid_url_is_rejected() {
        let profile = Profile {
            url: "not a url".into(),
            ..Profile::default()
        };
        assert!(matches!(
            profile.to_client_config("x"),
            Err(ConfigError::Validation { field, .. }) if field == "url"
        ));
    }
}
