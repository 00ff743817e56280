//! # Key/value storage seam and the persisted session keys
//!
//! [`KeyValueStore`] mirrors the browser's `localStorage`: string keys, string
//! values, synchronous access. Backends live in sibling modules
//! ([`crate::MemoryStore`] everywhere, `LocalStore` on the web).
//!
//! [`CredentialStore`] is the only writer of the two persisted keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `token` | the bearer credential, verbatim |
//! | `user` | the cached user record, as JSON |
//!
//! Both keys can be prefixed with a namespace (`"<ns>:token"`) so several
//! deployments served from one origin do not share a session.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::credential::Credential;
use crate::error::StoreError;

/// Synchronous string key/value storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str);
}

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// Resolved storage key names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageKeys {
    pub token: String,
    pub user: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::with_namespace(None)
    }
}

impl StorageKeys {
    /// `None` or an empty namespace keeps the bare `token` / `user` keys.
    pub fn with_namespace(namespace: Option<&str>) -> Self {
        match namespace.map(str::trim).filter(|ns| !ns.is_empty()) {
            Some(ns) => Self {
                token: format!("{ns}:{TOKEN_KEY}"),
                user: format!("{ns}:{USER_KEY}"),
            },
            None => Self {
                token: TOKEN_KEY.to_string(),
                user: USER_KEY.to_string(),
            },
        }
    }
}

/// Typed access to the persisted credential and cached user.
#[derive(Clone)]
pub struct CredentialStore {
    backend: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self { backend, keys }
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    /// The stored credential, if any. Blank values count as absent.
    pub fn credential(&self) -> Option<Credential> {
        self.backend
            .get(&self.keys.token)
            .and_then(|raw| Credential::parse(&raw))
    }

    /// The cached user record. A value that no longer deserializes is dropped.
    pub fn user<U: DeserializeOwned>(&self) -> Option<U> {
        let raw = self.backend.get(&self.keys.user)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(key = %self.keys.user, error = %e, "discarding unreadable cached user");
                self.backend.remove(&self.keys.user);
                None
            }
        }
    }

    pub fn save_credential(&self, credential: &Credential) -> Result<(), StoreError> {
        self.backend.set(&self.keys.token, credential.as_str())
    }

    pub fn save_user<U: Serialize>(&self, user: &U) -> Result<(), StoreError> {
        let json = serde_json::to_string(user).map_err(|e| StoreError::Corrupt {
            key: self.keys.user.clone(),
            reason: e.to_string(),
        })?;
        self.backend.set(&self.keys.user, &json)
    }

    pub fn clear_user(&self) {
        self.backend.remove(&self.keys.user);
    }

    /// Remove both keys.
    pub fn clear(&self) {
        self.backend.remove(&self.keys.token);
        self.backend.remove(&self.keys.user);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Cached {
        id: u32,
        email: String,
    }

    fn store() -> (MemoryStore, CredentialStore) {
        let memory = MemoryStore::new();
        let creds = CredentialStore::new(Arc::new(memory.clone()), StorageKeys::default());
        (memory, creds)
    }

    #[test]
    fn test_namespaced_keys() {
        let keys = StorageKeys::with_namespace(Some("staging"));
        assert_eq!(keys.token, "staging:token");
        assert_eq!(keys.user, "staging:user");

        assert_eq!(StorageKeys::with_namespace(Some("  ")), StorageKeys::default());
        assert_eq!(StorageKeys::default().token, "token");
    }

    #[test]
    fn test_credential_roundtrip_and_clear() {
        let (memory, creds) = store();
        assert!(creds.credential().is_none());

        let token = Credential::parse("abc.def.ghi").unwrap();
        creds.save_credential(&token).unwrap();
        creds
            .save_user(&Cached { id: 7, email: "a@b.c".into() })
            .unwrap();

        assert_eq!(memory.get("token").as_deref(), Some("abc.def.ghi"));
        assert_eq!(creds.credential(), Some(token));
        assert_eq!(
            creds.user::<Cached>(),
            Some(Cached { id: 7, email: "a@b.c".into() })
        );

        creds.clear();
        assert!(memory.get("token").is_none());
        assert!(memory.get("user").is_none());
    }

    #[test]
    fn test_blank_token_is_absent() {
        let (memory, creds) = store();
        memory.set("token", "   ").unwrap();
        assert!(creds.credential().is_none());
    }

    #[test]
    fn test_unreadable_user_is_dropped() {
        let (memory, creds) = store();
        memory.set("user", "{not json").unwrap();
        assert!(creds.user::<Cached>().is_none());
        assert!(memory.get("user").is_none());
    }
}
