//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` bundles the collaborator handles the services need. Every
//! handle is an `Arc<dyn Trait>` so one backend client can serve all roles
//! and tests can substitute the in-memory mocks below.

use std::sync::Arc;

use crate::backend::{CategoryLookup, IdentityProvider, ObjectStore, OfficeContext, RecordStore};

#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub offices: Arc<dyn OfficeContext>,
    pub records: Arc<dyn RecordStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub categories: Arc<dyn CategoryLookup>,
}

impl AppState {
    /// State where one backend serves every role.
    #[must_use]
    pub fn new<B>(backend: Arc<B>) -> Self
    where
        B: IdentityProvider + OfficeContext + RecordStore + ObjectStore + CategoryLookup + 'static,
    {
        Self {
            identity: backend.clone(),
            offices: backend.clone(),
            records: backend.clone(),
            objects: backend.clone(),
            categories: backend,
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;
