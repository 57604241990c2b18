//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use eway_config::ConfigError;
use eway_core::{CoreError, WizardError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the eWay backend at {url}")]
    #[diagnostic(
        code(eway::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             Set the URL with --backend or: eway config set backend <url>"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(eway::auth_failed),
        help(
            "Verify your email and password.\n\
             Run: eway config set-password --profile {profile}"
        )
    )]
    AuthFailed { message: String, profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(eway::no_credentials),
        help(
            "Configure credentials with: eway config init\n\
             Or set EWAY_EMAIL and EWAY_PASSWORD."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(code(eway::not_found))]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    #[error("Backend rejected the request: {message}")]
    #[diagnostic(code(eway::rejected))]
    Rejected { message: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error ({code}): {message}")]
    #[diagnostic(code(eway::api_error))]
    ApiError { code: String, message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(eway::validation))]
    Validation { field: String, reason: String },

    #[error("{0}")]
    #[diagnostic(
        code(eway::wizard),
        help("Supply the missing value as a flag, or run `eway buy` without --no-input.")
    )]
    Wizard(#[from] WizardError),

    // ── Passes ───────────────────────────────────────────────────────
    #[error("Not a valid pass payload: {message}")]
    #[diagnostic(
        code(eway::invalid_payload),
        help("Pass the JSON written by `eway buy --payload-out`, or scanned from the QR code.")
    )]
    InvalidPayload { message: String },

    #[error("Pass {ticket_id} expired on {end_date}")]
    #[diagnostic(code(eway::expired))]
    PassExpired { ticket_id: String, end_date: String },

    #[error("Could not produce pass artifact: {message}")]
    #[diagnostic(code(eway::export))]
    Export { message: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(eway::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: eway config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(eway::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("'{action}' requires confirmation")]
    #[diagnostic(
        code(eway::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(eway::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ────────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(eway::json))]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Rejected { .. } => exit_code::CONFLICT,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. } | Self::Wizard(_) | Self::NonInteractiveRequiresYes { .. } => {
                exit_code::USAGE
            }
            Self::Config(inner) => match **inner {
                ConfigError::NoCredentials { .. } => exit_code::AUTH,
                ConfigError::Validation { .. } => exit_code::USAGE,
                _ => exit_code::GENERAL,
            },
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(Box::new(err))
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed {
                message,
                profile: "<profile>".into(),
            },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::NotFound {
                entity_type,
                identifier,
            } => CliError::NotFound {
                resource_type: entity_type,
                identifier,
            },

            CoreError::InvalidPayload { message } => CliError::InvalidPayload { message },

            CoreError::Rejected { message } => CliError::Rejected { message },

            CoreError::Validation(e) => CliError::Wizard(e),

            CoreError::NoCredentials { profile } => CliError::NoCredentials { profile },

            CoreError::Export { message } => CliError::Export { message },

            CoreError::Api { message, status } => CliError::ApiError {
                code: status.map_or_else(|| "backend".into(), |s| format!("HTTP {s}")),
                message,
            },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Io(e) => CliError::Io(e),

            CoreError::Internal(message) => CliError::ApiError {
                code: "internal".into(),
                message,
            },
        }
    }
}
