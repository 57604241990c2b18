// Backend HTTP client
//
// Wraps `reqwest::Client` with base-URL joining, bearer token injection and
// status/body mapping. Endpoint groups (auth, tickets, stats) are inherent
// methods in separate files so this module stays about transport mechanics.

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Error bodies are often `{"message": "..."}` even on non-2xx responses.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Raw HTTP client for the ticketing backend.
///
/// Its HTTP client carries the session cookie jar; the optional bearer token
/// handed out by `/user/login` is held here. All methods return decoded bodies; HTTP failures are mapped
/// into [`Error`] before the caller sees them.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
    /// Token returned by login, sent as `Authorization: Bearer` when set.
    token: RwLock<Option<SecretString>>,
}

impl BackendClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// A cookie jar is added if the config doesn't carry one, since the
    /// profile endpoint authenticates through the session cookie.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
            token: RwLock::new(None),
        })
    }

    /// Create a client around a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            timeout: TransportConfig::default().timeout,
            token: RwLock::new(None),
        }
    }

    // ── Token management ─────────────────────────────────────────────

    /// Store the token returned by a successful login.
    pub fn set_token(&self, token: SecretString) {
        debug!("storing session token");
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    /// Forget the stored token.
    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Whether a login token is currently held.
    pub fn has_token(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn apply_token(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for a backend path, keeping any prefix in the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{path}"))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the JSON body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let builder = self.apply_token(self.http.get(url));
        self.send(builder).await
    }

    /// Send a POST request with a JSON body and decode the JSON response.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", url);
        let builder = self.apply_token(self.http.post(url).json(body));
        self.send(builder).await
    }

    /// Send a POST request without a body, discarding the response body.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<reqwest::StatusCode, Error> {
        debug!("POST {}", url);
        let builder = self.apply_token(self.http.post(url));
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        Ok(resp.status())
    }

    async fn send<T: DeserializeOwned>(&self, builder: reqwest::RequestBuilder) -> Result<T, Error> {
        let resp = builder.send().await.map_err(|e| self.transport_error(e))?;
        self.parse_response(resp).await
    }

    fn transport_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Map the HTTP status, then decode the body as `T`.
    ///
    /// Non-2xx bodies are checked for a `message` field so backend
    /// rejections surface with their own wording.
    async fn parse_response<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.transport_error(e))?;
        trace!(%status, len = body.len(), "response received");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| body.chars().take(200).collect());

            if status == reqwest::StatusCode::UNAUTHORIZED {
                return Err(Error::Authentication {
                    message: if message.is_empty() {
                        "session expired or invalid credentials".into()
                    } else {
                        message
                    },
                });
            }

            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
