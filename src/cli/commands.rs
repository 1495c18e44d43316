// Keywarden — CLI Command Handlers
//
// Each function handles one CLI subcommand. They coordinate between the
// store, identity, and engine modules. `load` prints the resolved record's
// projection as a single JSON line on stdout for the calling tool.

use chrono::Utc;

use crate::config::Config;
use crate::engine::CredentialEngine;
use crate::error::KeywardenError;
use crate::identity::AwsIdentityProvider;
use crate::profile::CredentialRecord;
use crate::store::{KeyringSecretStore, SecretStore};

use super::Commands;

/// Execute the parsed CLI command. The version string comes from the build,
/// passed in by main rather than read from ambient state.
pub async fn execute(
    command: Commands,
    profile: Option<String>,
    version: &str,
) -> Result<(), KeywardenError> {
    let config = Config::from_env()?;
    let profile = profile.unwrap_or_else(|| config.profile.clone());

    match command {
        Commands::Load => cmd_load(&config, &profile).await,
        Commands::Rotate => cmd_rotate(&config, &profile).await,
        Commands::Store {
            access_key_id,
            secret_access_key,
        } => cmd_store(&profile, access_key_id, secret_access_key),
        Commands::StoreAssume {
            role_arn,
            source_profile,
        } => cmd_store_assume(&profile, role_arn, source_profile),
        Commands::Delete => cmd_delete(&profile),
        Commands::Version => {
            println!("{} {}", crate::SERVICE, version);
            Ok(())
        }
    }
}

// ─── Load ────────────────────────────────────────────────────────────────────

async fn cmd_load(config: &Config, profile: &str) -> Result<(), KeywardenError> {
    let store = KeyringSecretStore::new();
    let provider = AwsIdentityProvider::from_env(&config.region).await;
    let engine = CredentialEngine::new(&store, &provider, config);

    let record = engine.resolve(profile, Utc::now()).await?;
    println!("{}", serde_json::to_string(&record.process_credentials())?);

    Ok(())
}

// ─── Rotate ──────────────────────────────────────────────────────────────────

async fn cmd_rotate(config: &Config, profile: &str) -> Result<(), KeywardenError> {
    let store = KeyringSecretStore::new();
    let provider = AwsIdentityProvider::from_env(&config.region).await;
    let engine = CredentialEngine::new(&store, &provider, config);

    engine.rotate(profile).await?;
    println!("✓ Profile {:?} rotated", profile);

    Ok(())
}

// ─── Store ───────────────────────────────────────────────────────────────────

fn cmd_store(
    profile: &str,
    access_key_id: String,
    secret_access_key: String,
) -> Result<(), KeywardenError> {
    let mut record = CredentialRecord {
        access_key_id,
        secret_access_key,
        ..Default::default()
    };

    write_record(profile, &mut record)?;
    println!("✓ Static record stored for profile {:?}", profile);

    Ok(())
}

fn cmd_store_assume(
    profile: &str,
    role_arn: String,
    source_profile: String,
) -> Result<(), KeywardenError> {
    let mut record = CredentialRecord {
        role_arn,
        source_profile,
        ..Default::default()
    };

    write_record(profile, &mut record)?;
    println!("✓ Delegated record stored for profile {:?}", profile);

    Ok(())
}

/// Persist a freshly built record. Shape invariants are enforced at
/// resolve/rotate time, not here.
fn write_record(profile: &str, record: &mut CredentialRecord) -> Result<(), KeywardenError> {
    let payload = record.encode()?;
    KeyringSecretStore::new().set(profile, &payload)?;
    Ok(())
}

// ─── Delete ──────────────────────────────────────────────────────────────────

fn cmd_delete(profile: &str) -> Result<(), KeywardenError> {
    KeyringSecretStore::new().delete(profile)?;
    println!("✓ Profile {:?} deleted", profile);

    Ok(())
}
