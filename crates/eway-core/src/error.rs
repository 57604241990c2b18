// ── Core error types ──
//
// User-facing errors from eway-core. Consumers never see HTTP status codes
// or JSON parse failures directly: `From<eway_api::Error>` translates
// transport-layer errors into domain variants.

use thiserror::Error;

use crate::wizard::WizardError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach the eWay backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Backend request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {entity_type} {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error("Invalid pass payload: {message}")]
    InvalidPayload { message: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Request rejected by backend: {message}")]
    Rejected { message: String },

    #[error(transparent)]
    Validation(#[from] WizardError),

    #[error("No credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("Could not produce pass artifact: {message}")]
    Export { message: String },

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

    #[error(transparent)]
    Io(#[from] std::io::Error),

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<eway_api::Error> for CoreError {
    fn from(err: eway_api::Error) -> Self {
        match err {
            eway_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            eway_api::Error::Transport(ref e) => {
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
            eway_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid backend URL: {e}"),
            },
            eway_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            eway_api::Error::Rejected { message } => CoreError::Rejected { message },
            eway_api::Error::Http { status: 404, message } => CoreError::NotFound {
                entity_type: "endpoint".into(),
                identifier: message,
            },
            eway_api::Error::Http { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            eway_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Unexpected backend response: {message}"))
            }
        }
    }
}
