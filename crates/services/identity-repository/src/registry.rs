//! Identity repositories - one safe repository per entity store.
//!
//! Built once at startup from the PostgreSQL store implementations and shared
//! (cheaply cloned) by every service that needs identity data.

use std::sync::Arc;

use common::{AppError, AppResult};

use crate::repository::*;

macro_rules! identity_repositories {
    ($($field:ident: $store:ident => $repo:ident),+ $(,)?) => {
        /// Registry of the identity repositories.
        #[derive(Clone)]
        pub struct IdentityRepositories {
            $($field: $repo,)+
        }

        impl IdentityRepositories {
            pub fn builder() -> IdentityRepositoriesBuilder {
                IdentityRepositoriesBuilder::default()
            }

            $(
                pub fn $field(&self) -> &$repo {
                    &self.$field
                }
            )+
        }

        /// Collects the inner stores; `build()` fails on the first one missing.
        #[derive(Default)]
        pub struct IdentityRepositoriesBuilder {
            $($field: Option<Arc<dyn $store>>,)+
        }

        impl IdentityRepositoriesBuilder {
            $(
                pub fn $field(mut self, store: Arc<dyn $store>) -> Self {
                    self.$field = Some(store);
                    self
                }
            )+

            pub fn build(self) -> AppResult<IdentityRepositories> {
                Ok(IdentityRepositories {
                    $(
                        $field: SafeRepository::new(
                            self.$field
                                .ok_or(AppError::MissingDependency(stringify!($field)))?,
                        ),
                    )+
                })
            }
        }
    };
}

identity_repositories! {
    api_keys: ApiKeyStore => ApiKeyRepository,
    claims: ClaimStore => ClaimRepository,
    consent_terms: ConsentTermStore => ConsentTermRepository,
    deny_list_entries: DenyListEntryStore => DenyListEntryRepository,
    dpop_keys: DpopKeyStore => DpopKeyRepository,
    external_logins: ExternalLoginStore => ExternalLoginRepository,
    idempotency_records: IdempotencyRecordStore => IdempotencyRecordRepository,
    impersonation_sessions: ImpersonationSessionStore => ImpersonationSessionRepository,
    key_chains: KeyChainStore => KeyChainRepository,
    login_attempts: LoginAttemptStore => LoginAttemptRepository,
    password_reset_tokens: PasswordResetTokenStore => PasswordResetTokenRepository,
    recovery_codes: RecoveryCodeStore => RecoveryCodeRepository,
    refresh_tokens: RefreshTokenStore => RefreshTokenRepository,
    roles: RoleStore => RoleRepository,
    role_claims: RoleClaimStore => RoleClaimRepository,
    role_hierarchies: RoleHierarchyStore => RoleHierarchyRepository,
    service_clients: ServiceClientStore => ServiceClientRepository,
    sessions: SessionStore => SessionRepository,
    signing_keys: SigningKeyStore => SigningKeyRepository,
    tenants: TenantStore => TenantRepository,
    users: UserStore => UserRepository,
    user_consents: UserConsentStore => UserConsentRepository,
    user_roles: UserRoleStore => UserRoleRepository,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{capture_logs, store_failure, test_context, token};

    /// Builder with every store set to an expectation-free mock
    fn complete_builder() -> IdentityRepositoriesBuilder {
        IdentityRepositories::builder()
            .api_keys(Arc::new(MockApiKeyStore::new()))
            .claims(Arc::new(MockClaimStore::new()))
            .consent_terms(Arc::new(MockConsentTermStore::new()))
            .deny_list_entries(Arc::new(MockDenyListEntryStore::new()))
            .dpop_keys(Arc::new(MockDpopKeyStore::new()))
            .external_logins(Arc::new(MockExternalLoginStore::new()))
            .idempotency_records(Arc::new(MockIdempotencyRecordStore::new()))
            .impersonation_sessions(Arc::new(MockImpersonationSessionStore::new()))
            .key_chains(Arc::new(MockKeyChainStore::new()))
            .login_attempts(Arc::new(MockLoginAttemptStore::new()))
            .password_reset_tokens(Arc::new(MockPasswordResetTokenStore::new()))
            .recovery_codes(Arc::new(MockRecoveryCodeStore::new()))
            .refresh_tokens(Arc::new(MockRefreshTokenStore::new()))
            .roles(Arc::new(MockRoleStore::new()))
            .role_claims(Arc::new(MockRoleClaimStore::new()))
            .role_hierarchies(Arc::new(MockRoleHierarchyStore::new()))
            .service_clients(Arc::new(MockServiceClientStore::new()))
            .sessions(Arc::new(MockSessionStore::new()))
            .signing_keys(Arc::new(MockSigningKeyStore::new()))
            .tenants(Arc::new(MockTenantStore::new()))
            .users(Arc::new(MockUserStore::new()))
            .user_consents(Arc::new(MockUserConsentStore::new()))
    }

    #[test]
    fn test_build_fails_when_store_missing() {
        let result = complete_builder().build();

        match result {
            Err(AppError::MissingDependency(name)) => assert_eq!(name, "user_roles"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("build should fail without a user role store"),
        }
    }

    #[test]
    fn test_empty_builder_reports_first_store() {
        let err = IdentityRepositories::builder().build().err();

        assert!(matches!(err, Some(AppError::MissingDependency("api_keys"))));
    }

    #[test]
    fn test_build_succeeds_with_every_store() {
        let repositories = complete_builder()
            .user_roles(Arc::new(MockUserRoleStore::new()))
            .build()
            .expect("all stores provided");

        assert_eq!(repositories.api_keys().name(), "ApiKeyRepository");
        assert_eq!(repositories.user_roles().name(), "UserRoleRepository");
        assert_eq!(repositories.deny_list_entries().name(), "DenyListEntryRepository");
    }

    #[test]
    fn test_repositories_delegate_to_registered_store() {
        let (logs, _guard) = capture_logs();

        let mut users = MockUserStore::new();
        users
            .expect_exists_by_email()
            .times(1)
            .returning(|_, _, _| Err(store_failure()));

        let repositories = complete_builder()
            .users(Arc::new(users))
            .user_roles(Arc::new(MockUserRoleStore::new()))
            .build()
            .expect("all stores provided");

        let shared = repositories.clone();
        let exists = tokio_test::block_on(shared.users().exists_by_email(
            &test_context(),
            "jane@example.com",
            &token(),
        ));

        assert!(!exists);
        assert_eq!(logs.error_count(), 1);
    }
}
