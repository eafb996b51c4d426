//! hostkey - host-scoped machine-identity manager for Vault AppRole.
//!
//! Issues and destroys AppRole secret-ids that carry the owning hostname
//! as metadata, and resolves hostnames back to their accessors. Enforces
//! one identity per hostname within a role, an invariant the backend
//! itself does not index or enforce.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── mod           # clap surface (role, -k, subcommands)
//! │   ├── commands      # per-subcommand handlers and presentation
//! │   └── output        # terminal output helpers
//! └── core/             # Core library components
//!     ├── broker/       # Backend access
//!     │   ├── mod       # Broker trait
//!     │   └── vault     # Vault AppRole HTTP implementation
//!     ├── resolver      # hostname -> accessor linear scan
//!     ├── lifecycle     # create / delete / list orchestration
//!     ├── session       # credential-resolution chain
//!     └── config        # /etc/vault/config.yaml loading
//! ```
//!
//! The resolver and lifecycle layers speak only to the [`core::broker::Broker`]
//! trait; the session token is established once and passed explicitly into
//! every call. All scans are fail-fast: a partial answer is never returned.

pub mod cli;
pub mod core;
pub mod error;
