//! Identity lifecycle orchestration.
//!
//! Create, delete, and list operations over the broker, with the
//! one-identity-per-hostname invariant enforced at create time and the
//! remaining broker-to-domain error translation. The broker session is
//! passed explicitly into every call; there is no ambient client.

use tracing::{debug, warn};

use crate::core::broker::Broker;
use crate::core::constants::METADATA_HOSTNAME;
use crate::core::resolver;
use crate::core::types::{Accessor, IdentityRecord, Metadata, NewIdentity, RoleName};
use crate::core::validation::require_nonempty;
use crate::error::{BrokerError, Error, Result};

/// Issue a new identity for `hostname` under `role`.
///
/// Resolves first and refuses with `DuplicateHostname` when the hostname
/// is already registered; no backend mutation happens in that case.
/// Re-invoking for an existing hostname errors rather than returning the
/// existing identity.
///
/// On success the returned secret value is revealed exactly once; the
/// caller must persist it immediately. On `CreateFailed` the identity may
/// or may not have been issued (the failure can postdate the backend
/// write); re-resolve to find out.
pub fn create(broker: &dyn Broker, role: &str, hostname: &str) -> Result<NewIdentity> {
    require_nonempty("role", role)?;
    require_nonempty("hostname", hostname)?;

    if let Some(accessor) = resolver::resolve(broker, role, hostname)? {
        warn!(%role, %hostname, %accessor, "hostname already registered");
        return Err(Error::DuplicateHostname {
            role: role.to_string(),
            hostname: hostname.to_string(),
        });
    }

    let mut metadata = Metadata::new();
    metadata.insert(METADATA_HOSTNAME.to_string(), hostname.to_string());

    let identity = broker
        .create_identity(role, &metadata)
        .map_err(|e| Error::CreateFailed {
            role: role.to_string(),
            hostname: hostname.to_string(),
            reason: e.to_string(),
        })?;

    debug!(%role, %hostname, accessor = %identity.accessor, "identity created");
    Ok(identity)
}

/// Delete the identity registered for `hostname` under `role`.
///
/// Returns the destroyed accessor for reporting. `NotFound` when the
/// hostname is not registered (nothing is mutated). On `DeleteFailed` the
/// outcome is indeterminate (no retry, no rollback); re-resolve to learn
/// the actual state.
pub fn delete_by_hostname(broker: &dyn Broker, role: &str, hostname: &str) -> Result<Accessor> {
    require_nonempty("role", role)?;
    require_nonempty("hostname", hostname)?;

    let accessor = resolver::resolve(broker, role, hostname)?.ok_or_else(|| Error::NotFound {
        role: role.to_string(),
        hostname: hostname.to_string(),
    })?;

    delete_by_accessor(broker, role, &accessor)?;
    Ok(accessor)
}

/// Delete an identity directly by accessor, bypassing resolution.
///
/// For callers already holding an accessor, e.g. from a prior `list`. A
/// stale or unknown accessor surfaces as `DeleteFailed`, the same as any
/// other backend refusal.
pub fn delete_by_accessor(broker: &dyn Broker, role: &str, accessor: &str) -> Result<()> {
    require_nonempty("role", role)?;
    require_nonempty("accessor", accessor)?;

    broker
        .delete_accessor(role, accessor)
        .map_err(|e| Error::DeleteFailed {
            role: role.to_string(),
            accessor: accessor.to_string(),
            reason: e.to_string(),
        })?;

    debug!(%role, %accessor, "identity deleted");
    Ok(())
}

/// List every identity under `role`, paired with its hostname tag.
///
/// An empty vec is a valid, successful result (the role exists with zero
/// identities), distinct from `RoleNotFound`. Fail-fast like the resolver:
/// one metadata-fetch failure aborts the whole listing. A partial listing
/// is never returned.
pub fn list(broker: &dyn Broker, role: &str) -> Result<Vec<IdentityRecord>> {
    require_nonempty("role", role)?;
    debug!(%role, "listing identities");

    let accessors = broker.list_accessors(role).map_err(|e| match e {
        BrokerError::RoleNotFound(role) => Error::RoleNotFound { role },
        BrokerError::PermissionDenied(role) => Error::PermissionDenied { role },
        other => Error::Listing {
            target: format!("role {}", role),
            reason: other.to_string(),
        },
    })?;

    let mut records = Vec::with_capacity(accessors.len());
    for accessor in accessors {
        let metadata = broker
            .get_metadata(role, &accessor)
            .map_err(|e| Error::Listing {
                target: format!("role {}", role),
                reason: e.to_string(),
            })?;

        records.push(IdentityRecord {
            hostname: metadata.get(METADATA_HOSTNAME).cloned(),
            accessor,
        });
    }

    Ok(records)
}

/// List all role names known to the backend.
///
/// The explicit discovery operation. Callers invoke it deliberately (the
/// CLI does so after `list` reports a missing role); it is never an
/// implicit substitute for a failed listing.
pub fn roles(broker: &dyn Broker) -> Result<Vec<RoleName>> {
    debug!("listing roles");
    broker.list_roles().map_err(|e| Error::Listing {
        target: "roles".to_string(),
        reason: e.to_string(),
    })
}
