//! User consent repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, UserConsent};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

#[async_trait]
pub trait UserConsentStore: EntityStore<Entity = UserConsent> {
    async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<UserConsent>>;

    /// The consent a user gave to one term version, if any
    async fn get_by_user_and_term(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        consent_term_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Option<UserConsent>>;

    async fn revoke(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn UserConsentStore {
    const NAME: &'static str = "UserConsentRepository";
}

pub type UserConsentRepository = SafeRepository<dyn UserConsentStore>;

impl UserConsentRepository {
    pub async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<UserConsent> {
        self.guard(
            ctx,
            "get_by_user_id",
            self.inner.get_by_user_id(ctx, user_id, cancel),
        )
        .await
    }

    pub async fn get_by_user_and_term(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        consent_term_id: Uuid,
        cancel: &CancellationToken,
    ) -> Option<UserConsent> {
        self.guard(
            ctx,
            "get_by_user_and_term",
            self.inner
                .get_by_user_and_term(ctx, user_id, consent_term_id, cancel),
        )
        .await
    }

    pub async fn revoke(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "revoke",
            self.inner.revoke(ctx, id, revoked_at, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub UserConsentStore {}

    #[async_trait]
    impl EntityStore for UserConsentStore {
        type Entity = UserConsent;

        async fn exists(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn get_by_id(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Option<UserConsent>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: UserConsent,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<UserConsent>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<UserConsent>;
    }

    #[async_trait]
    impl UserConsentStore for UserConsentStore {
        async fn get_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<UserConsent>>;

        async fn get_by_user_and_term(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            consent_term_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Option<UserConsent>>;

        async fn revoke(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            revoked_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}
