// ── Portal facade ──
//
// Everything a front end does against the backend, in domain terms:
// account lifecycle, pass submission and the admin views.

use std::sync::Arc;

use eway_api::{AdminTicket, BackendClient, DashboardStats, TicketPayload, TransportConfig};
use secrecy::SecretString;
use strum::Display;
use tracing::{info, warn};

use crate::admin::filter_tickets;
use crate::config::BackendConfig;
use crate::error::CoreError;
use crate::model::TicketRecord;
use crate::session::{Session, UserProfile};
use crate::wizard::Wizard;

/// What a signed-in account may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<PortalInner>`. Each clone shares one HTTP
/// client, so a login on one is seen by all.
#[derive(Clone)]
pub struct Portal {
    inner: Arc<PortalInner>,
}

struct PortalInner {
    config: BackendConfig,
    client: BackendClient,
    session: Session,
}

impl Portal {
    /// Build a portal for `config`. Does not contact the backend.
    pub fn new(config: BackendConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig::default()
            .with_timeout(config.timeout)
            .with_cookie_jar();
        let client = BackendClient::new(config.url.clone(), &transport)?;
        Ok(Self {
            inner: Arc::new(PortalInner {
                config,
                client,
                session: Session::new(),
            }),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &BackendClient {
        &self.inner.client
    }

    pub fn session(&self) -> &Session {
        &self.inner.session
    }

    /// A fresh purchase wizard owned by the configured account.
    pub fn new_wizard(&self) -> Wizard {
        Wizard::new(self.inner.config.user_ref)
    }

    // ── Account ──────────────────────────────────────────────────

    /// Sign in with explicit credentials.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Role, CoreError> {
        let resp = self.inner.client.login(email, password).await?;
        let role = if resp.is_admin() {
            Role::Admin
        } else {
            Role::User
        };
        info!(email, %role, "signed in");
        Ok(role)
    }

    /// Sign in with the credentials carried in the config.
    pub async fn login_configured(&self) -> Result<Role, CoreError> {
        let creds = self
            .inner
            .config
            .credentials
            .as_ref()
            .ok_or_else(|| CoreError::AuthenticationFailed {
                message: "no email/password configured".into(),
            })?;
        self.login(&creds.email, &creds.password).await
    }

    /// Create an account; returns the backend's confirmation message.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<String, CoreError> {
        let resp = self.inner.client.register(username, email, password).await?;
        info!(username, email, "account registered");
        Ok(resp.message_or_status())
    }

    /// Sign out. Local session state is cleared even when the backend call fails.
    pub async fn logout(&self) -> Result<(), CoreError> {
        let result = self.inner.client.logout().await;
        self.inner.session.clear();
        if let Err(ref e) = result {
            warn!(error = %e, "backend logout failed");
        }
        result.map_err(Into::into)
    }

    /// Load the signed-in user's profile into the session.
    pub async fn load_profile(&self) -> Result<UserProfile, CoreError> {
        self.inner.session.load(&self.inner.client).await
    }

    // ── Passes ───────────────────────────────────────────────────

    /// Persist an issued record; returns the backend's acknowledgement.
    pub async fn submit_ticket(&self, record: &TicketRecord) -> Result<String, CoreError> {
        let payload = TicketPayload::from(record);
        let resp = self.inner.client.save_ticket(&payload).await?;
        info!(ticket_id = %record.ticket_id, "ticket saved");
        Ok(resp.message_or_status())
    }

    // ── Admin ────────────────────────────────────────────────────

    pub async fn stats(&self) -> Result<DashboardStats, CoreError> {
        Ok(self.inner.client.stats().await?)
    }

    /// All tickets, optionally narrowed by a holder search.
    pub async fn tickets(&self, query: Option<&str>) -> Result<Vec<AdminTicket>, CoreError> {
        let all = self.inner.client.list_tickets().await?;
        Ok(match query {
            Some(q) => filter_tickets(&all, q).into_iter().cloned().collect(),
            None => all,
        })
    }
}
