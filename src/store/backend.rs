// Keywarden — Secret store backend
//
// Each profile maps to one keyring entry under the "keywarden" service.
// The payload is the record's JSON encoding; this layer never interprets it.

use keyring::Entry;

use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over named opaque payload storage, enabling the platform
/// keyring in production and an in-memory implementation in tests.
pub trait SecretStore {
    /// Fetch the payload stored under `name`.
    fn get(&self, name: &str) -> Result<String, StoreError>;

    /// Store (or overwrite) the payload under `name`.
    fn set(&self, name: &str, value: &str) -> Result<(), StoreError>;

    /// Remove the payload stored under `name`.
    fn delete(&self, name: &str) -> Result<(), StoreError>;
}

// ─── Platform Implementation ─────────────────────────────────────────────────

/// Production implementation using the `keyring` crate.
/// Dispatches to:
///   - Linux: D-Bus Secret Service (GNOME Keyring / KDE Wallet)
///   - macOS: Security.framework Keychain
///   - Windows: Windows Credential Manager
pub struct KeyringSecretStore {
    service: String,
}

impl KeyringSecretStore {
    pub fn new() -> Self {
        Self {
            service: crate::SERVICE.to_string(),
        }
    }

    /// Creates a store with a custom service name (useful for testing isolation).
    #[allow(dead_code)]
    pub fn with_service(service: &str) -> Self {
        Self {
            service: service.to_string(),
        }
    }

    fn entry(&self, name: &str) -> Result<Entry, StoreError> {
        Entry::new(&self.service, name)
            .map_err(|e| StoreError::Backend(format!("failed to create keyring entry: {}", e)))
    }
}

impl Default for KeyringSecretStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SecretStore for KeyringSecretStore {
    fn get(&self, name: &str) -> Result<String, StoreError> {
        match self.entry(name)?.get_password() {
            Ok(payload) => {
                tracing::debug!(profile = %name, "loaded record from keyring");
                Ok(payload)
            }
            Err(keyring::Error::NoEntry) => Err(StoreError::NotFound(name.to_string())),
            Err(e) => Err(StoreError::Backend(format!(
                "failed to read profile {:?}: {}",
                name, e
            ))),
        }
    }

    fn set(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.entry(name)?.set_password(value).map_err(|e| {
            StoreError::Backend(format!("failed to write profile {:?}: {}", name, e))
        })?;

        tracing::debug!(profile = %name, "stored record in keyring");
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        match self.entry(name)?.delete_credential() {
            Ok(()) => {
                tracing::info!(profile = %name, "record deleted from keyring");
                Ok(())
            }
            Err(keyring::Error::NoEntry) => Err(StoreError::NotFound(name.to_string())),
            Err(e) => Err(StoreError::Backend(format!(
                "failed to delete profile {:?}: {}",
                name, e
            ))),
        }
    }
}

// ─── In-Memory Mock for Testing ──────────────────────────────────────────────


// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::mock::MemorySecretStore;
    use super::*;

    #[test]
    fn test_set_then_get_round_trips() {
        let store = MemorySecretStore::new();
        store.set("work", "{\"Version\":1}").unwrap();
        assert_eq!(store.get("work").unwrap(), "{\"Version\":1}");
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let store = MemorySecretStore::new();
        assert!(matches!(
            store.get("missing"),
            Err(StoreError::NotFound(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let store = MemorySecretStore::new();
        store.set("work", "first").unwrap();
        store.set("work", "second").unwrap();
        assert_eq!(store.get("work").unwrap(), "second");
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let store = MemorySecretStore::new();
        assert!(matches!(store.delete("missing"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_delete_removes_the_payload() {
        let store = MemorySecretStore::new();
        store.set("work", "payload").unwrap();
        store.delete("work").unwrap();
        assert!(matches!(store.get("work"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_injected_set_failure() {
        let store = MemorySecretStore::new();
        store.set("work", "payload").unwrap();
        store.fail_sets();

        assert!(matches!(store.set("work", "other"), Err(StoreError::Backend(_))));
        // The previous payload must survive a failed write.
        assert_eq!(store.get("work").unwrap(), "payload");
    }
}
