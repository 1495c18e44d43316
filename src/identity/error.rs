// Keywarden — Identity provider error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("trust exchange for role {role_arn} failed: {reason}")]
    Exchange { role_arn: String, reason: String },

    #[error("trust exchange for role {role_arn} returned no credential material")]
    EmptyExchange { role_arn: String },

    #[error("create access key failed: {0}")]
    CreateKey(String),

    #[error("delete access key {access_key_id} failed: {reason}")]
    DeleteKey {
        access_key_id: String,
        reason: String,
    },
}
