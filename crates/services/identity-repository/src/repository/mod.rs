//! Repository layer - safe facades over the identity stores.
//!
//! Each `XxxStore` trait is the data-access contract implemented by the
//! PostgreSQL layer. `XxxRepository` is `SafeRepository<dyn XxxStore>` with
//! the entity-specific operations added as inherent methods.

mod safe;

pub use safe::{EntityStore, EntityStream, RepositoryLabel, SafeRepository};

mod api_key;
mod claim;
mod consent_term;
mod deny_list_entry;
mod dpop_key;
mod external_login;
mod idempotency_record;
mod impersonation_session;
mod key_chain;
mod login_attempt;
mod password_reset_token;
mod recovery_code;
mod refresh_token;
mod role;
mod role_claim;
mod role_hierarchy;
mod service_client;
mod session;
mod signing_key;
mod tenant;
mod user;
mod user_consent;
mod user_role;

pub use api_key::{ApiKeyRepository, ApiKeyStore};
pub use claim::{ClaimRepository, ClaimStore};
pub use consent_term::{ConsentTermRepository, ConsentTermStore};
pub use deny_list_entry::{DenyListEntryRepository, DenyListEntryStore};
pub use dpop_key::{DpopKeyRepository, DpopKeyStore};
pub use external_login::{ExternalLoginRepository, ExternalLoginStore};
pub use idempotency_record::{IdempotencyRecordRepository, IdempotencyRecordStore};
pub use impersonation_session::{ImpersonationSessionRepository, ImpersonationSessionStore};
pub use key_chain::{KeyChainRepository, KeyChainStore};
pub use login_attempt::{LoginAttemptRepository, LoginAttemptStore};
pub use password_reset_token::{PasswordResetTokenRepository, PasswordResetTokenStore};
pub use recovery_code::{RecoveryCodeRepository, RecoveryCodeStore};
pub use refresh_token::{RefreshTokenRepository, RefreshTokenStore};
pub use role::{RoleRepository, RoleStore};
pub use role_claim::{RoleClaimRepository, RoleClaimStore};
pub use role_hierarchy::{RoleHierarchyRepository, RoleHierarchyStore};
pub use service_client::{ServiceClientRepository, ServiceClientStore};
pub use session::{SessionRepository, SessionStore};
pub use signing_key::{SigningKeyRepository, SigningKeyStore};
pub use tenant::{TenantRepository, TenantStore};
pub use user::{UserRepository, UserStore};
pub use user_consent::{UserConsentRepository, UserConsentStore};
pub use user_role::{UserRoleRepository, UserRoleStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use {
    api_key::MockApiKeyStore, claim::MockClaimStore, consent_term::MockConsentTermStore,
    deny_list_entry::MockDenyListEntryStore, dpop_key::MockDpopKeyStore,
    external_login::MockExternalLoginStore, idempotency_record::MockIdempotencyRecordStore,
    impersonation_session::MockImpersonationSessionStore, key_chain::MockKeyChainStore,
    login_attempt::MockLoginAttemptStore, password_reset_token::MockPasswordResetTokenStore,
    recovery_code::MockRecoveryCodeStore, refresh_token::MockRefreshTokenStore,
    role::MockRoleStore, role_claim::MockRoleClaimStore,
    role_hierarchy::MockRoleHierarchyStore, service_client::MockServiceClientStore,
    session::MockSessionStore, signing_key::MockSigningKeyStore, tenant::MockTenantStore,
    user::MockUserStore, user_consent::MockUserConsentStore, user_role::MockUserRoleStore,
};
