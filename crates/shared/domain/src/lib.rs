//! Domain layer - Identity entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! Entities are passed through the repository layer unchanged.

pub mod access;
pub mod consent;
pub mod constants;
pub mod context;
pub mod credentials;
pub mod error;
pub mod idempotency;
pub mod pagination;
pub mod sessions;
pub mod tenant;
pub mod tokens;
pub mod user;

pub use access::{Claim, Role, RoleClaim, RoleHierarchy, UserRole};
pub use consent::{ConsentTerm, UserConsent};
pub use constants::*;
pub use context::{ExecutionContext, TenantInfo};
pub use credentials::{ApiKey, ExternalLogin, PasswordResetToken, RecoveryCode, ServiceClient};
pub use error::{DomainError, DomainResult};
pub use idempotency::{IdempotencyRecord, IdempotencyStatus};
pub use pagination::PageRequest;
pub use sessions::{ImpersonationSession, LoginAttempt, Session};
pub use tenant::Tenant;
pub use tokens::{DenyListEntry, DpopKey, KeyChain, RefreshToken, SigningKey, SigningKeyStatus};
pub use user::{User, UserStatus};
