//! In-memory [`Broker`] used by resolver and lifecycle unit tests.
//!
//! Holds per-role accessor/metadata state behind interior mutability, with
//! scriptable failures and call counters so tests can assert that an
//! operation performed no backend mutation.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use zeroize::Zeroizing;

use crate::core::broker::Broker;
use crate::core::constants::METADATA_HOSTNAME;
use crate::core::types::{Accessor, Metadata, NewIdentity, RoleName};
use crate::error::BrokerError;

#[derive(Default)]
pub struct MockBroker {
    state: RefCell<BTreeMap<RoleName, Vec<(Accessor, Metadata)>>>,
    forbidden: RefCell<BTreeSet<RoleName>>,
    failing_fetches: RefCell<BTreeSet<Accessor>>,
    fail_create: Cell<bool>,
    fail_delete: Cell<bool>,
    next_id: Cell<u32>,
    /// Number of create calls that reached the backend.
    pub creates: Cell<u32>,
    /// Number of delete calls that reached the backend.
    pub deletes: Cell<u32>,
}

impl MockBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing role with no identities.
    pub fn with_role(self, role: &str) -> Self {
        self.state.borrow_mut().entry(role.to_string()).or_default();
        self
    }

    /// Seed an identity with a hostname tag.
    pub fn seed(&self, role: &str, accessor: &str, hostname: &str) {
        let mut metadata = Metadata::new();
        metadata.insert(METADATA_HOSTNAME.to_string(), hostname.to_string());
        self.seed_with_metadata(role, accessor, metadata);
    }

    /// Seed an identity with an arbitrary metadata map.
    pub fn seed_with_metadata(&self, role: &str, accessor: &str, metadata: Metadata) {
        self.state
            .borrow_mut()
            .entry(role.to_string())
            .or_default()
            .push((accessor.to_string(), metadata));
    }

    /// Make accessor listing for `role` fail with permission denied.
    pub fn forbid(&self, role: &str) {
        self.forbidden.borrow_mut().insert(role.to_string());
    }

    /// Make the metadata fetch for `accessor` fail.
    pub fn fail_fetch(&self, accessor: &str) {
        self.failing_fetches.borrow_mut().insert(accessor.to_string());
    }

    pub fn fail_create(&self) {
        self.fail_create.set(true);
    }

    pub fn fail_delete(&self) {
        self.fail_delete.set(true);
    }

    /// Current accessor set under `role`, for unchanged-state assertions.
    pub fn accessors(&self, role: &str) -> Vec<Accessor> {
        self.state
            .borrow()
            .get(role)
            .map(|ids| ids.iter().map(|(a, _)| a.clone()).collect())
            .unwrap_or_default()
    }
}

impl Broker for MockBroker {
    fn list_accessors(&self, role: &str) -> Result<Vec<Accessor>, BrokerError> {
        if self.forbidden.borrow().contains(role) {
            return Err(BrokerError::PermissionDenied(role.to_string()));
        }
        match self.state.borrow().get(role) {
            Some(ids) => Ok(ids.iter().map(|(a, _)| a.clone()).collect()),
            None => Err(BrokerError::RoleNotFound(role.to_string())),
        }
    }

    fn get_metadata(&self, role: &str, accessor: &str) -> Result<Metadata, BrokerError> {
        if self.failing_fetches.borrow().contains(accessor) {
            return Err(BrokerError::Fetch {
                accessor: accessor.to_string(),
                reason: "lookup unavailable".to_string(),
            });
        }
        self.state
            .borrow()
            .get(role)
            .and_then(|ids| ids.iter().find(|(a, _)| a == accessor))
            .map(|(_, metadata)| metadata.clone())
            .ok_or_else(|| BrokerError::Fetch {
                accessor: accessor.to_string(),
                reason: "unknown accessor".to_string(),
            })
    }

    fn create_identity(
        &self,
        role: &str,
        metadata: &Metadata,
    ) -> Result<NewIdentity, BrokerError> {
        self.creates.set(self.creates.get() + 1);
        if self.fail_create.get() {
            return Err(BrokerError::Create("backend unavailable".to_string()));
        }
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        let accessor = format!("acc-{}", n);
        self.state
            .borrow_mut()
            .entry(role.to_string())
            .or_default()
            .push((accessor.clone(), metadata.clone()));
        Ok(NewIdentity {
            secret_value: Zeroizing::new(format!("secret-{}", n)),
            accessor,
        })
    }

    fn delete_accessor(&self, role: &str, accessor: &str) -> Result<(), BrokerError> {
        self.deletes.set(self.deletes.get() + 1);
        if self.fail_delete.get() {
            return Err(BrokerError::Delete {
                accessor: accessor.to_string(),
                reason: "backend unavailable".to_string(),
            });
        }
        let mut state = self.state.borrow_mut();
        let ids = state.get_mut(role).ok_or_else(|| BrokerError::Delete {
            accessor: accessor.to_string(),
            reason: "unknown role".to_string(),
        })?;
        let before = ids.len();
        ids.retain(|(a, _)| a != accessor);
        if ids.len() == before {
            return Err(BrokerError::Delete {
                accessor: accessor.to_string(),
                reason: "unknown accessor".to_string(),
            });
        }
        Ok(())
    }

    fn list_roles(&self) -> Result<Vec<RoleName>, BrokerError> {
        Ok(self.state.borrow().keys().cloned().collect())
    }
}
