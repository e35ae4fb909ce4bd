//! Identity Repository Library
//!
//! Non-throwing repositories over the identity data stores. Every store
//! failure is logged once and turned into an empty result, so callers in the
//! authentication flow never see a database error.

pub mod registry;
pub mod repository;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use registry::{IdentityRepositories, IdentityRepositoriesBuilder};
pub use repository::{EntityStore, EntityStream, RepositoryLabel, SafeRepository};
