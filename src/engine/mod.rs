// Keywarden — Credential Engine
//
// Resolution, refresh, and rotation over two injected collaborators: the
// secret store and the identity provider. Each operation re-reads the
// current record from the store; no state is shared across invocations.

mod error;
mod refresh;
mod resolver;
mod rotate;

pub use error::EngineError;

use zeroize::Zeroizing;

use crate::config::Config;
use crate::identity::IdentityProvider;
use crate::profile::CredentialRecord;
use crate::store::{SecretStore, StoreError};

/// The resolution & lifecycle engine. Holds immutable references to its two
/// collaborators; built once at startup.
pub struct CredentialEngine<'a, S, P> {
    store: &'a S,
    provider: &'a P,
    config: &'a Config,
}

impl<'a, S, P> CredentialEngine<'a, S, P>
where
    S: SecretStore,
    P: IdentityProvider,
{
    pub fn new(store: &'a S, provider: &'a P, config: &'a Config) -> Self {
        Self {
            store,
            provider,
            config,
        }
    }

    /// Load and decode the record stored under `name`.
    fn load_record(&self, name: &str) -> Result<CredentialRecord, EngineError> {
        let raw = Zeroizing::new(self.store.get(name).map_err(|e| match e {
            StoreError::NotFound(_) => EngineError::NotFound(name.to_string()),
            other => EngineError::Store {
                profile: name.to_string(),
                source: other,
            },
        })?);

        if raw.trim().is_empty() {
            return Err(EngineError::EmptyRecord(name.to_string()));
        }

        CredentialRecord::decode(&raw).map_err(|source| EngineError::MalformedRecord {
            profile: name.to_string(),
            source,
        })
    }

    /// Encode and persist `record` under `name`.
    fn persist_record(&self, name: &str, record: &mut CredentialRecord) -> Result<(), EngineError> {
        let payload = record.encode().map_err(|e| EngineError::Persist {
            profile: name.to_string(),
            reason: e.to_string(),
        })?;

        self.store.set(name, &payload).map_err(|e| EngineError::Persist {
            profile: name.to_string(),
            reason: e.to_string(),
        })
    }
}

// ─── End-to-End Tests ────────────────────────────────────────────────────────
