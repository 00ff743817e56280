//! Errors raised by storage backends and configuration parsing.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The browser refused the write (quota exceeded, private mode, ...).
    #[error("storage write failed for `{key}`: {reason}")]
    Write { key: String, reason: String },

    /// No storage backend is reachable (e.g. `window.localStorage` is disabled).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("invalid stored value for `{key}`: {reason}")]
    Corrupt { key: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}
