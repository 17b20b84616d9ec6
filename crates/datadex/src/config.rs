//! CLI configuration: thin wrapper around `datadex_config`.
//!
//! Adds the resolution steps that respect `GlobalOpts` flag overrides
//! (--url, --token, --insecure, --timeout) on top of the profile.

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;

use datadex_core::{AuthCredentials, ClientConfig, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use datadex_config::{
    Config, Defaults, Profile, config_path, load_config, load_config_or_default, save_config,
    store_token,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// Fill unset output and color flags from the config file's `[defaults]`.
pub fn apply_defaults(global: &mut GlobalOpts, config: &Config) {
    if global.output.is_none() {
        global.output = OutputFormat::from_str(&config.defaults.output, true).ok();
    }
    if global.color.is_none() {
        global.color = ColorMode::from_str(&config.defaults.color, true).ok();
    }
}

/// Comma-separated profile names, for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    if names.is_empty() {
        return "(none)".into();
    }
    names.sort();
    names.join(", ")
}

/// Build the runtime `ClientConfig` from the config file, profile, and
/// CLI overrides.
pub fn build_client_config(global: &GlobalOpts, config: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, config);

    // If a profile exists, use it with CLI flag overrides
    if let Some(profile) = config.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, config);
    }

    // An explicitly requested profile must exist
    if global.profile.is_some() && global.url.is_none() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(config),
        });
    }

    // No profile -- build from CLI flags / env vars alone
    let url_str = global.url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let mut client = ClientConfig::new(parse_url(url_str)?);
    client.auth = global
        .token
        .clone()
        .map_or(AuthCredentials::None, |t| AuthCredentials::Token(SecretString::from(t)));
    client.tls = if global.insecure || config.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };
    client.timeout = Duration::from_secs(global.timeout.unwrap_or(config.defaults.timeout));
    Ok(client)
}

/// Translate a `Profile` + global flags into a `ClientConfig`.
///
/// CLI flag overrides take priority over profile values.
fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    config: &Config,
) -> Result<ClientConfig, CliError> {
    // 1. URL (flag > env > profile)
    let url_str = global.url.as_deref().unwrap_or(&profile.url);
    let mut client = ClientConfig::new(parse_url(url_str)?);

    // 2. Credentials (flag > token_env > keyring > plaintext)
    let token = global
        .token
        .clone()
        .map(SecretString::from)
        .or_else(|| datadex_config::resolve_token(profile, profile_name));
    client.auth = datadex_config::auth_for(profile, token);

    // 3. TLS verification
    client.tls = if global.insecure || config.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        profile.tls()
    };

    // 4. Timeout (flag > profile > defaults)
    let seconds = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(config.defaults.timeout);
    client.timeout = Duration::from_secs(seconds);

    client.features = profile.feature_flags();
    Ok(client)
}

fn parse_url(url_str: &str) -> Result<url::Url, CliError> {
    url_str.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {url_str}"),
    })
}
