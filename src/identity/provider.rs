// Keywarden — Identity provider boundary
//
// Narrow capability interface injected into the engine. The production
// implementation lives in `aws.rs`; tests substitute the programmable mock.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::IdentityError;

/// A static identity's key material, scoped to a single exchange call.
#[derive(Clone)]
pub struct StaticKeys {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
}

/// Session material returned by a successful trust exchange. A provider
/// that reports no expiration yields `expiration: None`.
#[derive(Clone)]
pub struct SessionMaterial {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub expiration: Option<DateTime<Utc>>,
}

/// A newly created long-lived key pair.
#[derive(Clone)]
pub struct KeyPair {
    pub access_key_id: String,
    pub secret_access_key: String,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the remote identity capabilities: trust exchange and
/// long-lived key lifecycle.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange `base`'s trust for a session on `role_arn` of length `ttl`,
    /// tagged with `session_name` for downstream audit correlation.
    async fn exchange(
        &self,
        base: StaticKeys,
        role_arn: &str,
        ttl: Duration,
        session_name: &str,
    ) -> Result<SessionMaterial, IdentityError>;

    /// Create a new long-lived key pair for the calling identity.
    async fn create_key(&self) -> Result<KeyPair, IdentityError>;

    /// Delete the long-lived key identified by `access_key_id`.
    async fn delete_key(&self, access_key_id: &str) -> Result<(), IdentityError>;
}

// ─── Programmable Mock for Testing ───────────────────────────────────────────

/// A mock provider with scripted results that records every call.
/// Used for unit tests so no remote identity service is ever contacted.
#[cfg(test)]
pub mod mock {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    /// Arguments captured from one `exchange` invocation.
    pub struct ExchangeCall {
        pub base_access_key_id: String,
        pub role_arn: String,
        pub ttl: Duration,
        pub session_name: String,
    }

    pub struct MockIdentityProvider {
        session: Mutex<Option<SessionMaterial>>,
        key_pair: Mutex<Option<KeyPair>>,
        fail_exchange: AtomicBool,
        fail_delete: AtomicBool,
        exchanges: Mutex<Vec<ExchangeCall>>,
        creates: AtomicUsize,
        deletes: Mutex<Vec<String>>,
    }

    impl MockIdentityProvider {
        pub fn new() -> Self {
            Self {
                session: Mutex::new(None),
                key_pair: Mutex::new(None),
                fail_exchange: AtomicBool::new(false),
                fail_delete: AtomicBool::new(false),
                exchanges: Mutex::new(Vec::new()),
                creates: AtomicUsize::new(0),
                deletes: Mutex::new(Vec::new()),
            }
        }

        /// Every exchange succeeds with a copy of `session`.
        /// Without this, exchanges report empty credential material.
        pub fn with_session(self, session: SessionMaterial) -> Self {
            *self.session.lock().unwrap() = Some(session);
            self
        }

        /// Every create_key succeeds with a copy of `pair`.
        /// Without this, create_key fails.
        pub fn with_key_pair(self, pair: KeyPair) -> Self {
            *self.key_pair.lock().unwrap() = Some(pair);
            self
        }

        pub fn failing_exchange(self) -> Self {
            self.fail_exchange.store(true, Ordering::SeqCst);
            self
        }

        pub fn failing_delete(self) -> Self {
            self.fail_delete.store(true, Ordering::SeqCst);
            self
        }

        pub fn exchange_count(&self) -> usize {
            self.exchanges.lock().unwrap().len()
        }

        pub fn exchange_calls(&self) -> std::sync::MutexGuard<'_, Vec<ExchangeCall>> {
            self.exchanges.lock().unwrap()
        }

        pub fn create_count(&self) -> usize {
            self.creates.load(Ordering::SeqCst)
        }

        pub fn delete_calls(&self) -> Vec<String> {
            self.deletes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IdentityProvider for MockIdentityProvider {
        async fn exchange(
            &self,
            base: StaticKeys,
            role_arn: &str,
            ttl: Duration,
            session_name: &str,
        ) -> Result<SessionMaterial, IdentityError> {
            self.exchanges.lock().unwrap().push(ExchangeCall {
                base_access_key_id: base.access_key_id,
                role_arn: role_arn.to_string(),
                ttl,
                session_name: session_name.to_string(),
            });

            if self.fail_exchange.load(Ordering::SeqCst) {
                return Err(IdentityError::Exchange {
                    role_arn: role_arn.to_string(),
                    reason: "injected exchange failure".to_string(),
                });
            }

            match self.session.lock().unwrap().clone() {
                Some(session) => Ok(session),
                None => Err(IdentityError::EmptyExchange {
                    role_arn: role_arn.to_string(),
                }),
            }
        }

        async fn create_key(&self) -> Result<KeyPair, IdentityError> {
            self.creates.fetch_add(1, Ordering::SeqCst);

            match self.key_pair.lock().unwrap().clone() {
                Some(pair) => Ok(pair),
                None => Err(IdentityError::CreateKey(
                    "injected create failure".to_string(),
                )),
            }
        }

        async fn delete_key(&self, access_key_id: &str) -> Result<(), IdentityError> {
            self.deletes
                .lock()
                .unwrap()
                .push(access_key_id.to_string());

            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(IdentityError::DeleteKey {
                    access_key_id: access_key_id.to_string(),
                    reason: "injected delete failure".to_string(),
                });
            }

            Ok(())
        }
    }
}
