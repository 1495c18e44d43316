// Keywarden — Refresher
//
// Performs the trust exchange against a static base identity and merges the
// session material into the target record.

use crate::identity::{IdentityProvider, StaticKeys};
use crate::profile::CredentialRecord;
use crate::store::SecretStore;

use super::{CredentialEngine, EngineError};

impl<'a, S, P> CredentialEngine<'a, S, P>
where
    S: SecretStore,
    P: IdentityProvider,
{
    /// Exchange `base`'s trust for a fresh session on `target.role_arn` and
    /// merge the result. Only the four credential fields change; the
    /// delegation and policy fields pass through untouched.
    pub(crate) async fn refresh(
        &self,
        base: &CredentialRecord,
        mut target: CredentialRecord,
    ) -> Result<CredentialRecord, EngineError> {
        let keys = StaticKeys {
            access_key_id: base.access_key_id.clone(),
            secret_access_key: base.secret_access_key.clone(),
            session_token: base.session_token.clone(),
        };

        // Deterministic session name derived from the delegation's stable
        // identity, for downstream audit correlation.
        let session_name = format!("{}-{}", crate::SERVICE, target.source_profile);

        let session = self
            .provider
            .exchange(keys, &target.role_arn, target.session_ttl, &session_name)
            .await?;

        target.access_key_id = session.access_key_id;
        target.secret_access_key = session.secret_access_key;
        target.session_token = session.session_token;
        // An absent provider expiration leaves the record immediately stale,
        // forcing the next resolve to refresh instead of caching forever.
        target.expiration = session.expiration;

        tracing::info!(role_arn = %target.role_arn, "trust exchange complete");

        Ok(target)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::Utc;

    use crate::config::Config;
    use crate::identity::mock::MockIdentityProvider;
    use crate::identity::SessionMaterial;
    use crate::store::mock::MemorySecretStore;

    use super::*;

    fn base_record() -> CredentialRecord {
        CredentialRecord {
            access_key_id: "AKIAB".to_string(),
            secret_access_key: "SB".to_string(),
            session_token: "TB".to_string(),
            ..Default::default()
        }
    }

    fn target_record() -> CredentialRecord {
        CredentialRecord {
            role_arn: "arn:aws:iam::123456789012:role/deploy".to_string(),
            source_profile: "base".to_string(),
            session_ttl: Duration::from_secs(1800),
            skew_pad: Duration::from_secs(60),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_refresh_merges_only_credential_fields() {
        let expiration = Utc::now() + chrono::Duration::minutes(30);
        let store = MemorySecretStore::new();
        let provider = MockIdentityProvider::new().with_session(SessionMaterial {
            access_key_id: "ASIAX".to_string(),
            secret_access_key: "SX".to_string(),
            session_token: "TX".to_string(),
            expiration: Some(expiration),
        });
        let config = Config::default();
        let engine = CredentialEngine::new(&store, &provider, &config);

        let refreshed = engine.refresh(&base_record(), target_record()).await.unwrap();

        assert_eq!(refreshed.access_key_id, "ASIAX");
        assert_eq!(refreshed.secret_access_key, "SX");
        assert_eq!(refreshed.session_token, "TX");
        assert_eq!(refreshed.expiration, Some(expiration));

        // Delegation and policy fields are never modified by refresh.
        assert_eq!(refreshed.role_arn, "arn:aws:iam::123456789012:role/deploy");
        assert_eq!(refreshed.source_profile, "base");
        assert_eq!(refreshed.session_ttl, Duration::from_secs(1800));
        assert_eq!(refreshed.skew_pad, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_refresh_scopes_exchange_to_base_and_names_session() {
        let store = MemorySecretStore::new();
        let provider = MockIdentityProvider::new().with_session(SessionMaterial {
            access_key_id: "ASIAX".to_string(),
            secret_access_key: "SX".to_string(),
            session_token: "TX".to_string(),
            expiration: None,
        });
        let config = Config::default();
        let engine = CredentialEngine::new(&store, &provider, &config);

        engine.refresh(&base_record(), target_record()).await.unwrap();

        let calls = provider.exchange_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].base_access_key_id, "AKIAB");
        assert_eq!(calls[0].ttl, Duration::from_secs(1800));
        assert_eq!(calls[0].session_name, "keywarden-base");
    }

    #[tokio::test]
    async fn test_refresh_clears_expiration_when_provider_reports_none() {
        let store = MemorySecretStore::new();
        let provider = MockIdentityProvider::new().with_session(SessionMaterial {
            access_key_id: "ASIAX".to_string(),
            secret_access_key: "SX".to_string(),
            session_token: "TX".to_string(),
            expiration: None,
        });
        let config = Config::default();
        let engine = CredentialEngine::new(&store, &provider, &config);

        let mut target = target_record();
        target.expiration = Some(Utc::now());

        let refreshed = engine.refresh(&base_record(), target).await.unwrap();
        assert_eq!(refreshed.expiration, None);
        assert!(!refreshed.is_fresh(Utc::now() - chrono::Duration::days(1)));
    }
}
