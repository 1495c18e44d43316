// Keywarden — Record error types

use thiserror::Error;

/// Schema-invariant violations detected on a stored record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("static record must not carry a role ARN")]
    RoleOnStatic,

    #[error("static record is missing its access key id or secret access key")]
    MissingKeyMaterial,

    #[error("static record must not carry an expiration")]
    ExpirationOnStatic,
}
