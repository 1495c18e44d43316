// Keywarden — Application Entry Point
//
// Parses CLI arguments, initializes structured logging on stderr (stdout is
// reserved for the credential JSON handed to the calling tool), and
// dispatches to the command handler.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use keywarden::cli::{execute, Cli, Commands};

#[tokio::main]
async fn main() {
    // Default level is `info` (RUST_LOG=keywarden=debug for verbose output).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keywarden=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Load);

    if let Err(e) = execute(command, cli.profile, env!("CARGO_PKG_VERSION")).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
