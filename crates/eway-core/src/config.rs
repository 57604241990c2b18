// ── Runtime backend configuration ──
//
// Describes *how* to reach the ticketing backend. Carries credentials and
// connection tuning, but never touches disk: the CLI builds a
// `BackendConfig` from its profile and hands it in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Backend URL used when a profile names none.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8081";

/// Account id stamped on records when the backend hasn't told us ours.
pub const DEFAULT_USER_REF: u64 = 1;

/// Email and password for `/user/login`.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

/// Configuration for talking to one backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL; endpoint paths are joined onto it.
    pub url: Url,
    /// Login credentials, when the command needs a session.
    pub credentials: Option<Credentials>,
    /// Request timeout.
    pub timeout: Duration,
    /// `createdBy` for issued records.
    pub user_ref: u64,
}

impl BackendConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            credentials: None,
            timeout: Duration::from_secs(30),
            user_ref: DEFAULT_USER_REF,
        }
    }

    pub fn with_credentials(mut self, email: impl Into<String>, password: SecretString) -> Self {
        self.credentials = Some(Credentials {
            email: email.into(),
            password,
        });
        self
    }
}
