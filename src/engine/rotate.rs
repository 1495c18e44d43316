// Keywarden — Rotator
//
// Two-step key rotation: create the replacement pair, persist it, and only
// then delete the old key. The stored profile is never left pointing at a
// key that has already been deleted; the failure mode is always "too many
// live keys", never "zero usable keys".

use crate::identity::IdentityProvider;
use crate::store::SecretStore;

use super::{CredentialEngine, EngineError};

impl<'a, S, P> CredentialEngine<'a, S, P>
where
    S: SecretStore,
    P: IdentityProvider,
{
    /// Rotate the long-lived key pair stored under `name`.
    pub async fn rotate(&self, name: &str) -> Result<(), EngineError> {
        let mut record = self.load_record(name)?;

        if !record.is_static() {
            return Err(EngineError::NotStatic(name.to_string()));
        }

        record
            .validate_static()
            .map_err(|source| EngineError::InvalidRecord {
                profile: name.to_string(),
                source,
            })?;

        let pair = self.provider.create_key().await?;

        let old_key = std::mem::replace(&mut record.access_key_id, pair.access_key_id);
        record.secret_access_key = pair.secret_access_key;

        // Persist before touching the old key remotely. If this fails, the
        // old key is still the one on record and the new key is merely
        // orphaned at the provider; rotation can be retried safely.
        self.persist_record(name, &mut record)?;

        if let Err(source) = self.provider.delete_key(&old_key).await {
            return Err(EngineError::DeleteOldKey {
                profile: name.to_string(),
                access_key_id: old_key,
                source,
            });
        }

        tracing::info!(profile = %name, old_key = %old_key, "key rotation complete");

        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
