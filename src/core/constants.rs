//! Constants used throughout hostkey.
//!
//! Centralizes magic strings and well-known names.

/// Fixed path of the Vault configuration file.
pub const CONFIG_FILE: &str = "/etc/vault/config.yaml";

/// Environment variable overriding the Vault endpoint URL.
pub const ENV_URL: &str = "VAULT_URL";

/// Environment variable carrying an already-issued session token.
///
/// When both [`ENV_URL`] and [`ENV_TOKEN`] are set, file-based AppRole
/// authentication is bypassed entirely.
pub const ENV_TOKEN: &str = "VAULT_TOKEN";

/// The single metadata key this tool writes and reads on an identity.
pub const METADATA_HOSTNAME: &str = "hostname";

/// Request timeout applied to every backend call, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
