// Keywarden — Profile Resolver
//
// Decides whether a stored record is usable as-is, must be refreshed
// through a one-hop trust delegation, or is invalid.

use chrono::{DateTime, Utc};

use crate::identity::IdentityProvider;
use crate::profile::CredentialRecord;
use crate::store::SecretStore;

use super::{CredentialEngine, EngineError};

impl<'a, S, P> CredentialEngine<'a, S, P>
where
    S: SecretStore,
    P: IdentityProvider,
{
    /// Resolve the record stored under `name` as of `now`, refreshing a
    /// stale delegated session through its static source. Static profiles
    /// never trigger a network call; fresh delegated records are returned
    /// from the store untouched.
    pub async fn resolve(
        &self,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<CredentialRecord, EngineError> {
        let mut record = self.load_record(name)?;
        record.apply_defaults(self.config);

        if record.is_static() {
            record
                .validate_static()
                .map_err(|source| EngineError::InvalidRecord {
                    profile: name.to_string(),
                    source,
                })?;

            return Ok(record);
        }

        if record.source_profile.is_empty() {
            return Err(EngineError::MissingSourceProfile(name.to_string()));
        }

        let mut base = self.load_record(&record.source_profile)?;
        base.apply_defaults(self.config);

        // Single-hop rule, enforced on every resolve: a source that became
        // delegated after the target was stored is still rejected.
        if !base.is_static() {
            return Err(EngineError::NotSingleHop {
                profile: name.to_string(),
                source_profile: record.source_profile.clone(),
            });
        }

        base.validate_static()
            .map_err(|source| EngineError::InvalidRecord {
                profile: record.source_profile.clone(),
                source,
            })?;

        if record.is_fresh(now) {
            tracing::debug!(profile = %name, "delegated record still fresh, no exchange");
            return Ok(record);
        }

        let mut refreshed = self.refresh(&base, record).await?;

        // Best-effort persist: the refreshed material is valid regardless of
        // whether the write lands; the next invocation simply refreshes again.
        if let Err(e) = self.persist_record(name, &mut refreshed) {
            tracing::warn!(profile = %name, error = %e, "failed to persist refreshed record");
        }

        Ok(refreshed)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
