// Keywarden — CLI Module
//
// Command-line interface using clap derive macros.
// Subcommands: load (default), rotate, store, store-assume, delete, version.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::execute;

/// Keywarden — AWS credential_process helper backed by the platform keyring.
#[derive(Parser, Debug)]
#[command(name = "keywarden")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Profile to operate on (falls back to AWS_PROFILE, then "default").
    #[arg(long, global = true)]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve the profile and print its credentials for the calling tool.
    /// This is the default when no subcommand is given.
    Load,

    /// Rotate the profile's long-lived key pair.
    Rotate,

    /// Store a static credential record.
    Store {
        /// The long-lived access key id.
        #[arg(long)]
        access_key_id: String,

        /// The long-lived secret access key.
        /// Prefer an environment expansion over a literal to keep the value
        /// out of shell history.
        #[arg(long)]
        secret_access_key: String,
    },

    /// Store a delegated record that assumes a role via a static source profile.
    StoreAssume {
        /// The role to assume on each refresh.
        #[arg(long)]
        role_arn: String,

        /// The static profile whose trust is delegated.
        #[arg(long)]
        source_profile: String,
    },

    /// Delete the profile's record from the secret store.
    Delete,

    /// Print the tool name and version.
    Version,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
