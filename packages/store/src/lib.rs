//! # Store crate — browser-side persistence for the Family Profile client
//!
//! Everything the client keeps between page loads goes through this crate: the
//! session credential, the cached user, and the client configuration.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`storage`] | The synchronous [`KeyValueStore`] seam and the [`CredentialStore`] wrapper that owns the two storage keys |
//! | `memory` | In-memory backend for tests and native builds |
//! | `local` | `window.localStorage` backend (WASM + `web` feature) |
//! | [`credential`] | Bearer credential newtype and JWT expiry inspection |
//! | [`config`] | `ClientConfig` loaded from TOML |
//! | [`error`] | [`StoreError`] |

pub mod config;
pub mod credential;
pub mod error;
pub mod storage;

mod memory;
pub use memory::MemoryStore;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
mod local;
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub use local::LocalStore;

pub use config::ClientConfig;
pub use credential::{now_unix, Credential};
pub use error::StoreError;
pub use storage::{CredentialStore, KeyValueStore, StorageKeys};
