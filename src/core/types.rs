//! Domain types and aliases.
//!
//! Semantic aliases keep signatures descriptive; the two record structs are
//! the only shapes the presenter ever sees.

use std::collections::BTreeMap;

use serde::Serialize;
use zeroize::Zeroizing;

/// Stable, non-secret identifier for an issued secret value.
///
/// Safe to log and store; used for all lookups and deletes.
pub type Accessor = String;

/// An AppRole role name (identity-issuance namespace).
pub type RoleName = String;

/// Opaque hostname tag. No validation beyond non-emptiness.
pub type Hostname = String;

/// Key-value tags attached to an identity at creation time.
///
/// This tool writes exactly one key, `hostname`.
pub type Metadata = BTreeMap<String, String>;

/// Result of a create operation.
///
/// `secret_value` is revealed exactly once here and can never be fetched
/// again; it is wiped from memory on drop and deliberately carries no
/// `Debug` representation.
pub struct NewIdentity {
    /// One-time cleartext credential. Persist it immediately.
    pub secret_value: Zeroizing<String>,
    /// Backend-assigned accessor for later lookup/deletion.
    pub accessor: Accessor,
}

// The secret is never rendered: `Debug` redacts `secret_value` so the
// one-time credential cannot leak through a formatter (e.g. a panicking
// `unwrap_err`). Required because `Result::unwrap_err` bounds the Ok type
// on `Debug`.
impl std::fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewIdentity")
            .field("secret_value", &"<redacted>")
            .field("accessor", &self.accessor)
            .finish()
    }
}

/// One row of a listing: an accessor paired with its hostname tag.
///
/// `hostname` is `None` for identities issued outside this tool without
/// the metadata key; they are listed, not hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityRecord {
    pub hostname: Option<Hostname>,
    pub accessor: Accessor,
}
