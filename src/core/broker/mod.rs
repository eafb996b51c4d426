//! Backend access.
//!
//! The [`Broker`] trait is the seam between the lifecycle logic and the
//! identity backend. The backend exposes only accessor-keyed listing,
//! not hostname-keyed lookup, so everything above this trait is
//! built from these five calls.
//!
//! Implementations convert every transport and protocol failure into one
//! [`BrokerError`] per call; callers never see a raw HTTP error.

use crate::core::types::{Accessor, Metadata, NewIdentity, RoleName};
use crate::error::BrokerError;

mod vault;

pub use vault::VaultBroker;

#[cfg(test)]
pub mod mock;

/// Authenticated access to the identity backend.
pub trait Broker {
    /// List the accessors currently issued under `role`.
    ///
    /// `Ok(vec![])` is the Empty outcome: the role exists (or at least the
    /// backend has nothing listed for it), distinct from
    /// `BrokerError::RoleNotFound` and `BrokerError::PermissionDenied`.
    fn list_accessors(&self, role: &str) -> Result<Vec<Accessor>, BrokerError>;

    /// Fetch the metadata map attached to one accessor.
    fn get_metadata(&self, role: &str, accessor: &str) -> Result<Metadata, BrokerError>;

    /// Issue a new identity under `role` carrying `metadata`.
    ///
    /// The returned secret value is revealed exactly once here.
    fn create_identity(&self, role: &str, metadata: &Metadata)
        -> Result<NewIdentity, BrokerError>;

    /// Permanently destroy the identity behind `accessor`.
    ///
    /// A stale or unknown accessor is a backend error, not a crash.
    fn delete_accessor(&self, role: &str, accessor: &str) -> Result<(), BrokerError>;

    /// List all role names known to the backend.
    fn list_roles(&self) -> Result<Vec<RoleName>, BrokerError>;
}
