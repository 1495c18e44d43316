// Keywarden — Profile record module
//
// The credential record is the only persisted entity. A record is either
// static (long-lived key pair, no expiration) or delegated (short-lived
// session obtained by exchanging a static identity's trust for a role).

mod error;
mod record;

pub use error::RecordError;
pub use record::{
    CredentialRecord, ProcessCredentials, MAX_SESSION_TTL, MIN_SESSION_TTL, SCHEMA_VERSION,
};
