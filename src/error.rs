// Keywarden — Top-level error types
//
// Aggregates errors from the config, store, identity, and engine modules
// into a single error enum for the application boundary.

use thiserror::Error;

/// Top-level error type for all Keywarden operations.
#[derive(Debug, Error)]
pub enum KeywardenError {
    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Identity provider error: {0}")]
    Identity(#[from] crate::identity::IdentityError),

    #[error("{0}")]
    Engine(#[from] crate::engine::EngineError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, KeywardenError>;
