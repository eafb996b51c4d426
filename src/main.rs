//! hostkey - host-scoped machine-identity manager for Vault AppRole.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hostkey::cli::output;
use hostkey::cli::{execute, Cli};
use hostkey::error::Error;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env("HOSTKEY_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("hostkey=debug")
        } else {
            EnvFilter::new("hostkey=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time())
        .init();

    if let Err(e) = execute(cli) {
        // Format error with suggestion if available
        let suggestion = match &e {
            Error::Config(_) => {
                Some("create /etc/vault/config.yaml or set VAULT_URL and VAULT_TOKEN".to_string())
            }
            Error::CreateFailed { role, .. } | Error::DeleteFailed { role, .. } => {
                // Indeterminate outcome; a re-check is the recovery, not a retry.
                Some(format!("run: hostkey {} list", role))
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(&hint);
        }
        std::process::exit(1);
    }
}
