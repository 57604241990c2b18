// Account endpoints
//
// Login, registration, profile and logout. Login hands back a session
// cookie (kept in the client's jar) and optionally a bearer token.

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::client::BackendClient;
use crate::error::Error;
use crate::models::{LoginRequest, LoginResponse, ProfileResponse, RegisterRequest, StatusResponse};

impl BackendClient {
    /// Authenticate with email and password.
    ///
    /// `POST /user/login`
    ///
    /// A response whose `status` isn't `success` is an authentication
    /// failure carrying the backend's message. A returned token is stored
    /// and sent on subsequent requests.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<LoginResponse, Error> {
        let url = self.endpoint("user/login")?;
        debug!(email, "logging in");

        let body = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        let resp: LoginResponse = self.post(url, &body).await?;

        if !resp.is_success() {
            return Err(Error::Authentication {
                message: resp
                    .message
                    .clone()
                    .unwrap_or_else(|| "invalid email or password".into()),
            });
        }

        if let Some(ref token) = resp.token {
            self.set_token(SecretString::from(token.clone()));
        }

        debug!(role = ?resp.role, "login successful");
        Ok(resp)
    }

    /// Create a new account.
    ///
    /// `POST /user/register`
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<StatusResponse, Error> {
        let url = self.endpoint("user/register")?;
        debug!(username, email, "registering account");

        let body = RegisterRequest {
            username,
            email,
            password: password.expose_secret(),
        };
        let resp: StatusResponse = self.post(url, &body).await?;

        if resp.is_success() {
            Ok(resp)
        } else {
            Err(Error::Rejected {
                message: resp.message_or_status(),
            })
        }
    }

    /// Fetch the signed-in user's profile.
    ///
    /// `GET /user/profile` (session-cookie authenticated)
    pub async fn profile(&self) -> Result<ProfileResponse, Error> {
        let url = self.endpoint("user/profile")?;
        debug!("fetching profile");
        self.get(url).await
    }

    /// End the current session.
    ///
    /// `POST /api/auth/logout`
    ///
    /// The local token is dropped whatever the backend answers.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.endpoint("api/auth/logout")?;
        debug!("logging out at {}", url);

        let outcome = self.post_empty(url).await;
        self.clear_token();

        let status = outcome?;
        if !status.is_success() {
            warn!(%status, "logout answered with a non-success status");
        }
        debug!("logout complete");
        Ok(())
    }
}
