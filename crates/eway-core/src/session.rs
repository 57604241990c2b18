// ── Signed-in session ──
//
// The current user's profile, observable through a `watch` channel so a
// header line (or any other consumer) can follow it without polling.

use eway_api::{BackendClient, ProfileResponse};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::CoreError;

/// Name shown when no profile is loaded.
pub const GUEST_NAME: &str = "Guest User";

/// The signed-in user as the portal displays them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
    pub email: String,
}

impl From<ProfileResponse> for UserProfile {
    fn from(resp: ProfileResponse) -> Self {
        let non_empty = |s: Option<String>| s.filter(|v| !v.trim().is_empty());
        Self {
            username: non_empty(resp.username).unwrap_or_else(|| "User".into()),
            email: non_empty(resp.email).unwrap_or_else(|| "user@example.com".into()),
        }
    }
}

/// Profile loading state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Ready(UserProfile),
    Failed {
        reason: String,
    },
}

/// Holder of the session state.
#[derive(Debug)]
pub struct Session {
    state: watch::Sender<SessionState>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Idle);
        Self { state }
    }

    /// Follow state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        match &*self.state.borrow() {
            SessionState::Ready(profile) => Some(profile.clone()),
            _ => None,
        }
    }

    /// Username when loaded, otherwise [`GUEST_NAME`].
    pub fn display_name(&self) -> String {
        self.profile()
            .map_or_else(|| GUEST_NAME.to_owned(), |p| p.username)
    }

    /// Fetch the profile. A failure leaves the state `Failed` and is returned.
    pub async fn load(&self, client: &BackendClient) -> Result<UserProfile, CoreError> {
        self.state.send_replace(SessionState::Loading);
        match client.profile().await {
            Ok(resp) => {
                let profile = UserProfile::from(resp);
                debug!(username = %profile.username, "profile loaded");
                self.state.send_replace(SessionState::Ready(profile.clone()));
                Ok(profile)
            }
            Err(e) => {
                warn!(error = %e, "profile load failed");
                self.state.send_replace(SessionState::Failed {
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Forget the profile.
    pub fn clear(&self) {
        self.state.send_replace(SessionState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_defaults_fill_blanks() {
        let p = UserProfile::from(ProfileResponse {
            username: Some(" ".into()),
            email: None,
        });
        assert_eq!(p.username, "User");
        assert_eq!(p.email, "user@example.com");
    }

    #[test]
    fn guest_until_ready() {
        let session = Session::new();
        let rx = session.subscribe();
        assert_eq!(session.display_name(), GUEST_NAME);

        session.state.send_replace(SessionState::Ready(UserProfile {
            username: "nimal".into(),
            email: "n@example.lk".into(),
        }));
        assert_eq!(session.display_name(), "nimal");
        assert!(matches!(*rx.borrow(), SessionState::Ready(_)));

        session.clear();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.display_name(), GUEST_NAME);
    }
}
