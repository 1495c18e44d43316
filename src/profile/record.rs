// Keywarden — Credential record model
//
// SECURITY: `secret_access_key` and `session_token` are never included in
// Debug output or log messages. The record serializes to the versioned JSON
// shape stored in the keyring; absent fields are omitted entirely so a
// static record never carries delegation keys on the wire.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;

use super::RecordError;

/// Wire schema version, stamped on every persisted record.
pub const SCHEMA_VERSION: u32 = 1;

/// Smallest session lifetime the identity provider will grant.
pub const MIN_SESSION_TTL: Duration = Duration::from_secs(15 * 60);

/// Largest session lifetime the identity provider will grant.
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// The persisted credential record for one profile.
///
/// Exactly one of two shapes holds: static (`role_arn` empty, key material
/// present, no expiration) or delegated (`role_arn` and `source_profile`
/// present, session material filled in by refresh).
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CredentialRecord {
    pub version: u32,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub access_key_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub secret_access_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub role_arn: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub source_profile: String,

    #[serde(
        rename = "SessionTTL",
        with = "humantime_serde",
        skip_serializing_if = "Duration::is_zero"
    )]
    pub session_ttl: Duration,
    #[serde(with = "humantime_serde", skip_serializing_if = "Duration::is_zero")]
    pub skew_pad: Duration,
}

impl CredentialRecord {
    /// A record is static iff it names no role to assume.
    pub fn is_static(&self) -> bool {
        self.role_arn.is_empty()
    }

    /// Check the static-shape invariants: key material present, no role ARN,
    /// no expiration. Static records never expire.
    pub fn validate_static(&self) -> Result<(), RecordError> {
        if !self.role_arn.is_empty() {
            return Err(RecordError::RoleOnStatic);
        }

        if self.access_key_id.is_empty() || self.secret_access_key.is_empty() {
            return Err(RecordError::MissingKeyMaterial);
        }

        if self.expiration.is_some() {
            return Err(RecordError::ExpirationOnStatic);
        }

        Ok(())
    }

    /// Fill `skew_pad`/`session_ttl` from the process defaults where the
    /// record leaves them unset, then clamp `session_ttl` into the allowed
    /// range. Clamping applies unconditionally, including to explicit values.
    pub fn apply_defaults(&mut self, config: &Config) {
        if self.skew_pad.is_zero() {
            self.skew_pad = config.skew_pad;
        }

        if self.session_ttl.is_zero() {
            self.session_ttl = config.session_ttl;
        }

        self.session_ttl = self.session_ttl.clamp(MIN_SESSION_TTL, MAX_SESSION_TTL);
    }

    /// Whether the record can be handed out as-is at `now`.
    ///
    /// Static records are always fresh. A delegated record is fresh iff its
    /// expiration is set and `now + skew_pad` is strictly before it; a
    /// delegated record with no expiration is never fresh.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        if self.is_static() {
            return true;
        }

        let Some(expiration) = self.expiration else {
            return false;
        };

        match chrono::Duration::from_std(self.skew_pad) {
            Ok(pad) => now + pad < expiration,
            // A pad too large to represent can never be satisfied.
            Err(_) => false,
        }
    }

    /// Encode for persistence, stamping the schema version.
    pub fn encode(&mut self) -> Result<String, serde_json::Error> {
        self.version = SCHEMA_VERSION;
        serde_json::to_string(self)
    }

    /// Decode a persisted payload.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Project the record into the shape a credential consumer expects,
    /// stripping the delegation, TTL, and skew-pad fields. Never mutates
    /// the source record.
    pub fn process_credentials(&self) -> ProcessCredentials {
        ProcessCredentials {
            version: SCHEMA_VERSION,
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            session_token: self.session_token.clone(),
            expiration: self.expiration,
        }
    }
}

/// Custom Debug implementation that NEVER reveals secret material.
impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("version", &self.version)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[REDACTED]")
            .field("session_token", &"[REDACTED]")
            .field("expiration", &self.expiration)
            .field("role_arn", &self.role_arn)
            .field("source_profile", &self.source_profile)
            .field("session_ttl", &self.session_ttl)
            .field("skew_pad", &self.skew_pad)
            .finish()
    }
}

/// The subset of a record emitted to the calling tool: key material,
/// session token, and expiration only.
#[derive(Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProcessCredentials {
    pub version: u32,
    pub access_key_id: String,
    pub secret_access_key: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub session_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<DateTime<Utc>>,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
