//! Error taxonomy for hostkey.
//!
//! Every backend/network failure is caught at the broker boundary and
//! converted into exactly one [`BrokerError`] per operation invocation; the
//! resolver and lifecycle layers then translate those into the domain
//! variants of [`Error`]. One operation, one outcome: no raw transport
//! errors escape, nothing is swallowed.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error: the single outcome of one operation invocation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("role not found: {role}")]
    RoleNotFound { role: String },

    #[error("permission denied for role {role}")]
    PermissionDenied { role: String },

    #[error("hostname {hostname} already has an identity under role {role}")]
    DuplicateHostname { role: String, hostname: String },

    #[error("no identity found for hostname {hostname} under role {role}")]
    NotFound { role: String, hostname: String },

    /// A per-accessor metadata fetch (or the accessor listing itself)
    /// failed mid-scan. The scan aborts rather than returning a partial
    /// index, so a `Resolution` error says nothing about whether the
    /// hostname is registered.
    #[error("resolving hostname {hostname} under role {role} failed: {reason}")]
    Resolution {
        role: String,
        hostname: String,
        reason: String,
    },

    /// The backend create call failed. The identity may or may not have
    /// been issued; the caller should re-resolve or list to find out, not
    /// blindly retry.
    #[error("creating identity for hostname {hostname} under role {role} failed: {reason}")]
    CreateFailed {
        role: String,
        hostname: String,
        reason: String,
    },

    /// The backend destroy call failed. The identity may or may not
    /// remain; the caller should re-resolve or list to find out.
    #[error("deleting accessor {accessor} under role {role} failed: {reason}")]
    DeleteFailed {
        role: String,
        accessor: String,
        reason: String,
    },

    #[error("listing {target} failed: {reason}")]
    Listing { target: String, reason: String },
}

/// Configuration-file failures.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[source] serde_yaml::Error),
}

/// Authentication-bootstrap failures.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to build http client: {0}")]
    Client(String),

    #[error("login failed: {0}")]
    LoginFailed(String),
}

/// Input guards on caller-supplied strings.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Per-operation failures at the broker boundary.
///
/// Each broker method returns only its own variants (accessor listing may
/// additionally return `RoleNotFound`/`PermissionDenied`, the two
/// distinguishable listing refusals). Transport and protocol errors are
/// folded into the operation's reason string at the boundary.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("role not found: {0}")]
    RoleNotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("listing accessors failed: {0}")]
    List(String),

    #[error("metadata fetch failed for accessor {accessor}: {reason}")]
    Fetch { accessor: String, reason: String },

    #[error("secret-id creation failed: {0}")]
    Create(String),

    #[error("destroy failed for accessor {accessor}: {reason}")]
    Delete { accessor: String, reason: String },
}
