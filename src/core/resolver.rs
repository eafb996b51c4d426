//! Hostname-to-accessor resolution.
//!
//! The backend indexes identities by accessor only; the hostname tag lives
//! in per-identity metadata. Resolution is therefore a linear scan over
//! the role's accessors, comparing each one's fetched metadata.

use tracing::debug;

use crate::core::broker::Broker;
use crate::core::constants::METADATA_HOSTNAME;
use crate::core::types::Accessor;
use crate::error::{BrokerError, Error, Result};

/// Find the accessor bound to `hostname` under `role`, if any.
///
/// Scans accessors in backend-returned order (unordered). Should the
/// one-identity-per-hostname invariant ever be violated, the first
/// encountered match wins; that tie-break is implementation-defined, not
/// policy. Accessors without a hostname tag never match.
///
/// Fail-fast, not partial: any single metadata-fetch failure aborts the
/// whole resolution, because a best-effort index could silently hide an
/// existing duplicate or miss the real match. Costs O(n) backend calls for
/// n identities under the role; the index is rebuilt on every call and
/// never cached.
///
/// # Errors
///
/// `RoleNotFound` and `PermissionDenied` pass through from the listing
/// call; every other backend failure surfaces as `Resolution`.
pub fn resolve(broker: &dyn Broker, role: &str, hostname: &str) -> Result<Option<Accessor>> {
    debug!(%role, %hostname, "resolving hostname");

    let accessors = broker
        .list_accessors(role)
        .map_err(|e| translate(e, role, hostname))?;

    for accessor in accessors {
        let metadata = broker
            .get_metadata(role, &accessor)
            .map_err(|e| translate(e, role, hostname))?;

        if metadata.get(METADATA_HOSTNAME).map(String::as_str) == Some(hostname) {
            debug!(%accessor, "hostname resolved");
            return Ok(Some(accessor));
        }
    }

    debug!("hostname not registered");
    Ok(None)
}

fn translate(error: BrokerError, role: &str, hostname: &str) -> Error {
    match error {
        BrokerError::RoleNotFound(role) => Error::RoleNotFound { role },
        BrokerError::PermissionDenied(role) => Error::PermissionDenied { role },
        other => Error::Resolution {
            role: role.to_string(),
            hostname: hostname.to_string(),
            reason: other.to_string(),
        },
    }
}
