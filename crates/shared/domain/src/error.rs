//! Domain-level errors.
//!
//! Raised by entity methods that would break an identity invariant.

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Built-in roles keep their name
    #[error("System role '{0}' cannot be renamed")]
    SystemRoleImmutable(String),

    /// A role hierarchy edge pointing at its own role
    #[error("Role {0} cannot inherit from itself")]
    SelfReferentialRole(Uuid),
}

pub type DomainResult<T> = Result<T, DomainError>;
