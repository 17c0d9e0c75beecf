//! Backend — persistence, storage, and identity collaborators.
//!
//! DESIGN
//! ======
//! The submission pipeline only talks to the async traits in [`types`].
//! [`supabase::SupabaseClient`] implements all of them against the hosted
//! backend's REST, storage, and auth endpoints; tests swap in the in-memory
//! mocks from `state::test_helpers`.

pub mod supabase;
pub mod types;

pub use supabase::SupabaseClient;
pub use types::{CategoryLookup, IdentityProvider, ObjectStore, Office, OfficeContext, RecordStore, StoreError, User, UserCategory};
