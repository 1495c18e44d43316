// Keywarden — Store error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no record stored under profile {0:?}")]
    NotFound(String),

    #[error("keyring backend error: {0}")]
    Backend(String),
}
