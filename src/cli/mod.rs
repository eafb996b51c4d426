//! Command-line interface.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

pub use commands::execute;

/// hostkey - manage per-host Vault AppRole secret-ids.
#[derive(Parser)]
#[command(
    name = "hostkey",
    about = "Manage per-host AppRole secret-ids, one identity per hostname",
    version
)]
pub struct Cli {
    /// The role to act on
    pub role_name: String,

    /// Don't verify the TLS certificate of the endpoint
    #[arg(short = 'k', long = "insecure")]
    pub insecure: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// List identities under the role (hostname and accessor)
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Issue a new identity for a hostname; prints the one-time secret
    Create {
        /// Hostname to register
        hostname: String,
    },

    /// Delete the identity registered for a hostname
    Delete {
        /// Hostname to unregister
        hostname: String,
    },

    /// Delete an identity directly by its secret-id accessor
    #[command(name = "delete_from_secret")]
    DeleteFromSecret {
        /// Secret-id accessor
        secret_id_accessor: String,
    },
}
