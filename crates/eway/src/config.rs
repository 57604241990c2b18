//! CLI configuration: a thin wrapper around `eway_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--backend, --email, --timeout, ...).

use std::time::Duration;

use secrecy::SecretString;

use eway_core::{BackendConfig, DEFAULT_USER_REF};

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use eway_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names, for error help text.
pub fn available_profiles(config: &Config) -> String {
    let mut names: Vec<_> = config.profiles.keys().cloned().collect();
    names.sort();
    if names.is_empty() {
        "(none)".into()
    } else {
        names.join(", ")
    }
}

/// Translate the active profile + global flags into a `BackendConfig`.
///
/// Flags win over profile values. A missing profile is only an error when
/// it was asked for by name; otherwise built-in defaults apply.
pub fn resolve_backend_config(global: &GlobalOpts) -> Result<BackendConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: available_profiles(&cfg),
            });
        }
        None => Profile::default(),
    };

    // 1. Backend URL (flag > env > profile)
    let url_str = global.backend.as_deref().unwrap_or(&profile.backend);
    let url = eway_config::parse_backend_url(url_str)?;

    let mut config = BackendConfig::new(url);

    // 2. Timeout (flag > profile > defaults)
    config.timeout = Duration::from_secs(
        global
            .timeout
            .or(profile.timeout)
            .unwrap_or(cfg.defaults.timeout),
    );

    // 3. Account reference for issued passes
    config.user_ref = profile.user_ref.unwrap_or(DEFAULT_USER_REF);

    // 4. Credentials, when both halves resolve
    let email = global
        .email
        .clone()
        .or_else(|| eway_config::resolve_email(&profile, &profile_name).ok());
    let credentials = email.and_then(|email| {
        resolve_password_with_flag(&profile, &profile_name, global)
            .ok()
            .map(|password| (email, password))
    });
    if let Some((email, password)) = credentials {
        config = config.with_credentials(email, password);
    }

    Ok(config)
}

/// Resolve the password with CLI flag override, then fall through to shared resolution.
fn resolve_password_with_flag(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<SecretString, CliError> {
    if let Some(ref pw) = global.password {
        return Ok(SecretString::from(pw.clone()));
    }
    Ok(eway_config::resolve_password(profile, profile_name)?)
}
