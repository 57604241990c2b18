//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use chrono::NaiveDate;

use eway_core::{PassDuration, PaymentMethod, Portal, RiderCategory, Role, Station};

use crate::cli::{CategoryArg, DurationArg, GlobalOpts, PaymentArg, StationArg};
use crate::config;
use crate::error::CliError;
use crate::output;

// ── Argument conversions ────────────────────────────────────────────

impl From<StationArg> for Station {
    fn from(arg: StationArg) -> Self {
        match arg {
            StationArg::Colombo => Self::Colombo,
            StationArg::Galle => Self::Galle,
            StationArg::Kandy => Self::Kandy,
            StationArg::Kalutara => Self::Kalutara,
        }
    }
}

impl From<CategoryArg> for RiderCategory {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Adult => Self::Adult,
            CategoryArg::Student => Self::Student,
        }
    }
}

impl From<DurationArg> for PassDuration {
    fn from(arg: DurationArg) -> Self {
        match arg {
            DurationArg::Week => Self::Week,
            DurationArg::Month => Self::Month,
        }
    }
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Ezcash => Self::EWallet,
            PaymentArg::Card => Self::Card,
        }
    }
}

/// Parse a `YYYY-MM-DD` date given for `field`.
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, CliError> {
    raw.trim()
        .parse::<NaiveDate>()
        .map_err(|e| CliError::Validation {
            field: field.into(),
            reason: format!("expected YYYY-MM-DD, got '{raw}' ({e})"),
        })
}

// ── Input ───────────────────────────────────────────────────────────

/// Whether prompts can be shown.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !is_interactive() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(prompt_err)?;
    Ok(confirmed)
}

/// Map a dialoguer / interactive I/O failure into CliError.
pub fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Read a payload from a file path, or stdin for `-`.
pub fn read_payload(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    let path = Path::new(input);
    std::fs::read_to_string(path).map_err(|e| CliError::Validation {
        field: "payload".into(),
        reason: format!("cannot read {}: {e}", path.display()),
    })
}

// ── Session ─────────────────────────────────────────────────────────

/// Sign in with the resolved credentials before a session-bound call.
pub async fn sign_in(portal: &Portal, global: &GlobalOpts) -> Result<Role, CliError> {
    if portal.config().credentials.is_none() {
        let cfg = config::load_config_or_default();
        return Err(CliError::NoCredentials {
            profile: config::active_profile_name(global, &cfg),
        });
    }
    let pb = output::spinner("Signing in…", global);
    let result = portal.login_configured().await;
    pb.finish_and_clear();
    result.map_err(|e| with_profile(e.into(), global))
}

/// Fill in the active profile name on auth failures.
pub fn with_profile(err: CliError, global: &GlobalOpts) -> CliError {
    match err {
        CliError::AuthFailed { message, .. } => {
            let cfg = config::load_config_or_default();
            CliError::AuthFailed {
                message,
                profile: config::active_profile_name(global, &cfg),
            }
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_parse_strictly() {
        assert_eq!(
            parse_date("start", " 2025-01-15 ").ok(),
            "2025-01-15".parse().ok()
        );
        assert!(matches!(
            parse_date("start", "15/01/2025"),
            Err(CliError::Validation { field, .. }) if field == "start"
        ));
    }

    #[test]
    fn arg_enums_map_to_domain() {
        assert_eq!(Station::from(StationArg::Kalutara), Station::Kalutara);
        assert_eq!(PaymentMethod::from(PaymentArg::Ezcash), PaymentMethod::EWallet);
        assert_eq!(RiderCategory::from(CategoryArg::Student), RiderCategory::Student);
        assert_eq!(PassDuration::from(DurationArg::Month), PassDuration::Month);
    }
}
