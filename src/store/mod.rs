// Keywarden — Store Module
//
// Durable named-blob storage for credential records. The platform keyring
// owns byte-level storage and encryption at rest; this module only moves
// opaque payloads in and out.

mod backend;
mod error;

pub use backend::{KeyringSecretStore, SecretStore};
pub use error::StoreError;

#[cfg(test)]
pub use backend::mock;
