//! # API crate — typed REST client for the Family Profile backend
//!
//! Every remote operation the frontend performs is a method on [`ApiClient`].
//! Each method builds one [`Request`], hands it to the client's [`Transport`],
//! and returns either a typed value or an [`ApiError`] whose `Display` is the
//! message the view shows.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | `ApiClient`, the `Transport` seam and the reqwest-backed `HttpTransport` |
//! | [`mock`] | `MockTransport`: canned responses and request capture for tests |
//! | [`auth`] | Login, registration, password recovery, email verification, 2FA, and the [`session`] state machine |
//! | `families`, `children`, `photos`, `invites`, `profile`, `permissions` | Service methods per REST area |
//! | [`models`] | Request and response types |
//! | [`error`] | [`ApiError`] |
//!
//! ## Routes
//!
//! | Area | Routes |
//! |------|--------|
//! | auth | `/auth/login`, `/auth/register`, `/auth/verify-email`, `/auth/forgot-password`, `/auth/reset-password`, `/auth/2fa-status`, `/auth/enable-2fa`, `/auth/verify-2fa`, `/auth/disable-2fa` |
//! | families | `/families`, `/families/:id` |
//! | children | `/families/:id/children[/:childId]`, `/user/children[/:id]` |
//! | photos | `/photos/:familyId`, `/photos/:familyId/upload`, `/photos/:photoId` |
//! | invites | `/invites/invite-link`, `/invites/invite-code`, `/invites/by-code/:code`, `/invites/join` |
//! | profile | `/user/profile`, `/user/profile-picture` |
//! | permissions | `/users`, `/users/:id/permissions` |

pub mod auth;
pub mod client;
pub mod error;
pub mod mock;
pub mod models;

mod children;
mod families;
mod invites;
mod permissions;
mod photos;
mod profile;

pub use auth::session;
pub use client::{ApiClient, Body, HttpTransport, Method, Part, Request, Response, Transport};
pub use error::ApiError;
pub use mock::MockTransport;
pub use models::*;
pub use session::{Session, SessionManager};

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use base64ct::{Base64UrlUnpadded, Encoding};
    use store::{CredentialStore, KeyValueStore, MemoryStore, StorageKeys};

    use crate::{ApiClient, MockTransport};

    /// A client over a fresh mock and memory store, optionally signed in.
    pub fn client(token: Option<&str>) -> (ApiClient<MockTransport>, MockTransport, CredentialStore) {
        let memory = MemoryStore::new();
        if let Some(token) = token {
            memory.set("token", token).unwrap();
        }
        let creds = CredentialStore::new(Arc::new(memory), StorageKeys::default());
        let mock = MockTransport::new();
        (ApiClient::new(mock.clone(), creds.clone()), mock, creds)
    }

    pub fn jwt(payload: &str) -> String {
        let header = Base64UrlUnpadded::encode_string(br#"{"alg":"HS256"}"#);
        let body = Base64UrlUnpadded::encode_string(payload.as_bytes());
        format!("{header}.{body}.sig")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::testing::client;
    use crate::Method;

    #[tokio::test]
    async fn test_bearer_read_on_every_call() {
        let (api, mock, creds) = client(Some("first"));
        mock.respond(Method::Get, "/families", 200, &json!({"data":{"families":[]}}));
        api.list_families().await.unwrap();

        creds.clear();
        api.list_families().await.unwrap();

        let sent = mock.requests();
        assert_eq!(sent[0].bearer.as_deref(), Some("first"));
        assert_eq!(sent[1].bearer, None);
    }

    #[tokio::test]
    async fn test_any_401_clears_stored_session() {
        let (api, mock, creds) = client(Some("stale"));
        mock.respond(Method::Get, "/photos/f1", 401, &json!({"message":"Unauthorized"}));
        let err = api.list_photos(&"f1".into()).await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(creds.credential().is_none());
    }
}
