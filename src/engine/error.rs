// Keywarden — Engine error types
//
// Every variant carries the profile name involved. Nothing is retried
// internally; retry is the invoking process's responsibility.

use thiserror::Error;

use crate::identity::IdentityError;
use crate::profile::RecordError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("profile {0:?} not found")]
    NotFound(String),

    #[error("profile {0:?} holds an empty record")]
    EmptyRecord(String),

    #[error("profile {profile:?} holds an undecodable record: {source}")]
    MalformedRecord {
        profile: String,
        source: serde_json::Error,
    },

    #[error("profile {profile:?} is invalid: {source}")]
    InvalidRecord {
        profile: String,
        source: RecordError,
    },

    #[error("profile {0:?} names a role but no source profile")]
    MissingSourceProfile(String),

    #[error("source profile {source_profile:?} of {profile:?} is not static (delegation is limited to one hop)")]
    NotSingleHop {
        profile: String,
        source_profile: String,
    },

    #[error("profile {0:?} is not static (only long-lived key pairs can be rotated)")]
    NotStatic(String),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("failed to persist profile {profile:?}: {reason}")]
    Persist { profile: String, reason: String },

    #[error("store error for profile {profile:?}: {source}")]
    Store {
        profile: String,
        source: StoreError,
    },

    #[error("rotation of {profile:?} complete, but deleting old key {access_key_id} failed: {source}")]
    DeleteOldKey {
        profile: String,
        access_key_id: String,
        source: IdentityError,
    },
}
