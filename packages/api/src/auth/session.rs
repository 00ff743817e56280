//! # Client session state machine
//!
//! ```text
//!   Initializing ──restore──▶ Authenticated ──logout / 401 / exp──▶ Anonymous
//!        │                          ▲                                  │
//!        └──────restore─────────────┼──────────────▶ Anonymous ◀───────┘
//!                                   └────────── login ───────────────┘
//! ```
//!
//! [`SessionManager`] owns the in-memory [`Session`] and is the only writer of
//! the persisted credential besides the API client's 401 handling, which
//! [`SessionManager::sync`] picks up.

use store::{Credential, CredentialStore};

use crate::client::{ApiClient, Transport};
use crate::error::ApiError;
use crate::models::{AuthPayload, Credentials, User};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    Initializing,
    Anonymous,
    Authenticated {
        credential: Credential,
        user: Option<User>,
    },
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated { .. })
    }

    /// True only before the persisted credential has been inspected.
    pub fn is_loading(&self) -> bool {
        matches!(self, Session::Initializing)
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated { user, .. } => user.as_ref(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SessionManager {
    credentials: CredentialStore,
    state: Session,
    skew_secs: i64,
}

impl PartialEq for SessionManager {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.skew_secs == other.skew_secs
    }
}

impl SessionManager {
    pub fn new(credentials: CredentialStore, skew_secs: i64) -> Self {
        Self {
            credentials,
            state: Session::Initializing,
            skew_secs,
        }
    }

    pub fn state(&self) -> &Session {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user()
    }

    /// Leave `Initializing` by inspecting the persisted credential.
    /// An expired JWT is cleared from storage.
    pub fn restore(&mut self, now: i64) -> &Session {
        self.state = match self.credentials.credential() {
            Some(credential) if credential.is_expired(now, self.skew_secs) => {
                tracing::info!("stored credential has expired, clearing it");
                self.credentials.clear();
                Session::Anonymous
            }
            Some(credential) => Session::Authenticated {
                credential,
                user: self.credentials.user(),
            },
            None => Session::Anonymous,
        };
        tracing::debug!(authenticated = self.is_authenticated(), "session restored");
        &self.state
    }

    /// Persist the token and user from a login or registration response.
    /// Returns `false`, leaving the state untouched, when there is no token.
    pub fn establish(&mut self, payload: AuthPayload) -> bool {
        let Some(credential) = payload.token.as_deref().and_then(Credential::parse) else {
            return false;
        };
        if let Err(e) = self.credentials.save_credential(&credential) {
            tracing::warn!(error = %e, "could not persist credential");
        }
        match &payload.user {
            Some(user) => {
                if let Err(e) = self.credentials.save_user(user) {
                    tracing::warn!(error = %e, "could not cache user");
                }
            }
            None => self.credentials.clear_user(),
        }
        tracing::info!("session established");
        self.state = Session::Authenticated {
            credential,
            user: payload.user,
        };
        true
    }

    /// Log in and establish the session. A failure leaves the state unchanged.
    pub async fn login<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        credentials: &Credentials,
    ) -> Result<(), ApiError> {
        let payload = client.login(credentials).await?;
        if self.establish(payload) {
            Ok(())
        } else {
            Err(ApiError::Decode(crate::auth::LOGIN_FALLBACK.to_string()))
        }
    }

    pub fn logout(&mut self) {
        self.credentials.clear();
        if self.is_authenticated() {
            tracing::info!("signed out");
        }
        self.state = Session::Anonymous;
    }

    /// Replace the cached user of an authenticated session.
    pub fn set_user(&mut self, updated: User) {
        if let Session::Authenticated { user, .. } = &mut self.state {
            if let Err(e) = self.credentials.save_user(&updated) {
                tracing::warn!(error = %e, "could not cache user");
            }
            *user = Some(updated);
        }
    }

    /// Drop an authenticated session whose JWT has expired. Returns whether
    /// the state changed.
    pub fn expire_if_needed(&mut self, now: i64) -> bool {
        let expired = matches!(
            &self.state,
            Session::Authenticated { credential, .. } if credential.is_expired(now, self.skew_secs)
        );
        if expired {
            tracing::info!("session expired");
            self.logout();
        }
        expired
    }

    /// React to a failed call: a 401 ends the session.
    pub fn handle_error(&mut self, err: &ApiError) -> bool {
        if err.is_unauthorized() && self.is_authenticated() {
            tracing::info!("credential rejected, signing out");
            self.logout();
            return true;
        }
        false
    }

    /// Follow the persisted credential when something else cleared it.
    pub fn sync(&mut self) -> bool {
        if self.is_authenticated() && self.credentials.credential().is_none() {
            self.state = Session::Anonymous;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, jwt};
    use crate::Method;
    use serde_json::json;

    fn credentials() -> Credentials {
        Credentials {
            email: "marie@example.org".into(),
            password: "secret".into(),
        }
    }

    #[test]
    fn test_restore_without_token_is_anonymous() {
        let (api, _, _) = client(None);
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        assert!(session.loading());
        assert_eq!(session.restore(1_000), &Session::Anonymous);
        assert!(!session.loading());
    }

    #[test]
    fn test_restore_trusts_opaque_token() {
        let (api, mock, _) = client(Some("fake-token"));
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(1_000);
        assert!(session.is_authenticated());
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn test_restore_clears_expired_jwt() {
        let token = jwt(r#"{"exp":1000}"#);
        let (api, _, creds) = client(Some(&token));
        let mut session = SessionManager::new(api.credentials().clone(), 0);
        session.restore(2_000);
        assert_eq!(session.state(), &Session::Anonymous);
        assert!(creds.credential().is_none());
    }

    #[tokio::test]
    async fn test_login_persists_and_logout_clears() {
        let (api, mock, creds) = client(None);
        mock.respond(
            Method::Post,
            "/auth/login",
            200,
            &json!({"status":"success","data":{"token":"t-123","user":{"_id":"u1","email":"marie@example.org"}}}),
        );
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(0);
        session.login(&api, &credentials()).await.unwrap();

        assert!(session.is_authenticated());
        assert_eq!(creds.credential().unwrap().as_str(), "t-123");
        assert_eq!(session.user().unwrap().email, "marie@example.org");

        session.logout();
        assert!(!session.is_authenticated());
        assert!(creds.credential().is_none());
        assert!(creds.user::<User>().is_none());
    }

    #[tokio::test]
    async fn test_failed_login_stays_anonymous() {
        let (api, mock, creds) = client(None);
        mock.respond(
            Method::Post,
            "/auth/login",
            400,
            &json!({"status":"error","message":"Invalid credentials"}),
        );
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(0);
        let err = session.login(&api, &credentials()).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(session.state(), &Session::Anonymous);
        assert!(creds.credential().is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_response_ends_session() {
        let (api, mock, creds) = client(Some("stale"));
        mock.respond(Method::Get, "/families", 401, &json!({"message":"Token expired"}));
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(0);
        assert!(session.is_authenticated());

        let err = api.list_families().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(creds.credential().is_none());

        assert!(session.sync());
        assert_eq!(session.state(), &Session::Anonymous);
        assert!(!session.handle_error(&err));
    }

    #[tokio::test]
    async fn test_unauthorized_error_signs_out_live_session() {
        let (api, mock, creds) = client(Some("stale"));
        mock.respond(Method::Get, "/families", 401, &json!({"message":"Token expired"}));
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(0);
        assert!(session.is_authenticated());

        let err = api.list_families().await.unwrap_err();
        assert!(session.handle_error(&err));
        assert_eq!(session.state(), &Session::Anonymous);
        assert!(creds.credential().is_none());
        assert!(!session.sync());
    }

    #[test]
    fn test_other_errors_keep_session() {
        let (api, _, creds) = client(Some("tok"));
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(0);
        let err = ApiError::Server {
            status: 500,
            message: "boom".into(),
        };
        assert!(!session.handle_error(&err));
        assert!(session.is_authenticated());
        assert!(creds.credential().is_some());
    }

    #[test]
    fn test_periodic_expiry() {
        let token = jwt(r#"{"exp":5000}"#);
        let (api, _, creds) = client(Some(&token));
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(1_000);
        assert!(session.is_authenticated());

        assert!(!session.expire_if_needed(4_000));
        assert!(session.expire_if_needed(4_980));
        assert!(!session.is_authenticated());
        assert!(creds.credential().is_none());
    }

    #[test]
    fn test_registration_without_token_does_not_sign_in() {
        let (api, _, _) = client(None);
        let mut session = SessionManager::new(api.credentials().clone(), 30);
        session.restore(0);
        assert!(!session.establish(AuthPayload::default()));
        assert_eq!(session.state(), &Session::Anonymous);
    }
}
