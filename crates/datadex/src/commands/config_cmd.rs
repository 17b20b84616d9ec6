//! Config subcommand handlers.

use std::collections::HashMap;

use dialoguer::{Confirm, Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Defaults, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

/// Copy of the config with plaintext tokens masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
    cfg
}

/// Format config for display. Expects an already redacted config.
fn format_config(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "url = \"{}\"", p.url);
        if let Some(ref token) = p.token {
            let _ = writeln!(out, "token = \"{token}\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref header) = p.auth_header {
            let _ = writeln!(out, "auth_header = \"{header}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        let flags = [
            ("insecure", p.insecure),
            ("notifications_enabled", p.notifications_enabled),
            ("index_dashboards", p.index_dashboards),
            ("index_users", p.index_users),
            ("issue_tracking", p.issue_tracking),
        ];
        for (key, value) in flags.iter().filter_map(|(k, v)| v.map(|v| (k, v))) {
            let _ = writeln!(out, "{key} = {value}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

fn parse_bool(field: &str, value: &str) -> Result<bool, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: "must be 'true' or 'false'".into(),
    })
}

/// Apply one `config set` assignment to a profile.
fn set_profile_value(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "url" => {
            value.parse::<url::Url>().map_err(|_| CliError::Validation {
                field: "url".into(),
                reason: format!("invalid URL: {value}"),
            })?;
            profile.url = value;
        }
        "token" => profile.token = Some(value),
        "token_env" | "token-env" => profile.token_env = Some(value),
        "auth_header" | "auth-header" => profile.auth_header = Some(value),
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "insecure" => profile.insecure = Some(parse_bool(key, &value)?),
        "timeout" => {
            profile.timeout = Some(value.parse().map_err(|_| CliError::Validation {
                field: "timeout".into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        "notifications_enabled" | "notifications-enabled" => {
            profile.notifications_enabled = Some(parse_bool(key, &value)?);
        }
        "index_dashboards" | "index-dashboards" => {
            profile.index_dashboards = Some(parse_bool(key, &value)?);
        }
        "index_users" | "index-users" => profile.index_users = Some(parse_bool(key, &value)?),
        "issue_tracking" | "issue-tracking" => {
            profile.issue_tracking = Some(parse_bool(key, &value)?);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: url, token, token_env, \
                     auth_header, ca_cert, insecure, timeout, notifications_enabled, \
                     index_dashboards, index_users, issue_tracking"
                ),
            });
        }
    }
    Ok(())
}

/// Offer to store the token in the system keyring or return it for the
/// config file.
///
/// Returns `Some(token)` if the user chose plaintext, `None` if stored in keyring.
fn prompt_token_storage(profile_name: &str, token: &str) -> Result<Option<String>, CliError> {
    let choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let selection = Select::new()
        .with_prompt("Where to store the token?")
        .items(choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    if selection == 0 {
        config::store_token(profile_name, token)?;
        eprintln!("   ✓ Token stored in system keyring");
        Ok(None)
    } else {
        Ok(Some(token.to_owned()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

#[allow(clippy::too_many_lines)]
pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("datadex configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // 1. Profile name
            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            // 2. Catalog URL
            let url: String = Input::new()
                .with_prompt("Catalog URL")
                .default("http://localhost:5000".into())
                .validate_with(|input: &String| {
                    input
                        .parse::<url::Url>()
                        .map(|_| ())
                        .map_err(|e| format!("invalid URL: {e}"))
                })
                .interact_text()
                .map_err(prompt_err)?;

            // 3. Token (optional)
            let token = rpassword::prompt_password("Bearer token (leave empty for none): ")
                .map_err(prompt_err)?;
            let token = if token.is_empty() {
                None
            } else {
                prompt_token_storage(&profile_name, &token)?
            };

            // 4. Feature toggles
            let confirm = |prompt: &str, default: bool| -> Result<bool, CliError> {
                Confirm::new()
                    .with_prompt(prompt)
                    .default(default)
                    .interact()
                    .map_err(prompt_err)
            };
            let index_dashboards = confirm("Are dashboards indexed?", false)?;
            let notifications_enabled = confirm("Enable owner notifications?", false)?;
            let issue_tracking = confirm("Enable issue tracking?", false)?;

            // 5. Build profile and config
            let profile = Profile {
                url,
                token,
                index_dashboards: Some(index_dashboards),
                notifications_enabled: Some(notifications_enabled),
                issue_tracking: Some(issue_tracking),
                ..Profile::default()
            };

            let mut profiles = HashMap::new();
            profiles.insert(profile_name.clone(), profile);

            let cfg = Config {
                default_profile: Some(profile_name.clone()),
                defaults: Defaults::default(),
                profiles,
            };

            // 6. Write config
            config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", config_path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: datadex popular");

            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output(), &cfg, format_config, |_| {
                "config".into()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            set_profile_value(profile, &key, value)?;

            config::save_config(&cfg)?;
            output::success(global, &format!("Set {key} on profile '{profile_name}'"));
            Ok(())
        }

        // ── SetToken ────────────────────────────────────────────────
        ConfigCommand::SetToken => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    name: profile_name,
                    available: config::available_profiles(&cfg),
                });
            }

            let token = rpassword::prompt_password("Bearer token: ").map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "token cannot be empty".into(),
                });
            }
            config::store_token(&profile_name, &token)?;

            output::success(
                global,
                &format!("Token stored in system keyring for profile '{profile_name}'"),
            );
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.active_profile_name();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: datadex config init");
            } else {
                let mut names: Vec<_> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();

            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    name,
                    available: config::available_profiles(&cfg),
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            output::success(global, &format!("Default profile set to '{name}'"));
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_accepts_dashed_and_underscored_keys() {
        let mut profile = Profile::default();
        set_profile_value(&mut profile, "index-dashboards", "true".into()).unwrap();
        set_profile_value(&mut profile, "issue_tracking", "false".into()).unwrap();
        set_profile_value(&mut profile, "timeout", "45".into()).unwrap();
        assert_eq!(profile.index_dashboards, Some(true));
        assert_eq!(profile.issue_tracking, Some(false));
        assert_eq!(profile.timeout, Some(45));
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut profile = Profile::default();
        assert!(set_profile_value(&mut profile, "insecure", "maybe".into()).is_err());
        assert!(set_profile_value(&mut profile, "url", "not a url".into()).is_err());
        assert!(set_profile_value(&mut profile, "colour", "red".into()).is_err());
    }

    #[test]
    fn show_masks_plaintext_tokens() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                url: "https://catalog.example.com".into(),
                token: Some("s3cret".into()),
                ..Profile::default()
            },
        );
        let text = format_config(&redacted(&cfg));
        assert!(text.contains("token = \"****\""));
        assert!(!text.contains("s3cret"));
    }
}
