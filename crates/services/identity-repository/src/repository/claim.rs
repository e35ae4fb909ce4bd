//! User claim repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{Claim, ExecutionContext};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// User claim data-access contract.
#[async_trait]
pub trait ClaimStore: EntityStore<Entity = Claim> {
    /// List claims attached to a user
    async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Claim>>;

    /// List a user's claims of one type
    async fn get_by_type(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        claim_type: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Claim>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        claim: Claim,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn ClaimStore {
    const NAME: &'static str = "ClaimRepository";
}

pub type ClaimRepository = SafeRepository<dyn ClaimStore>;

impl ClaimRepository {
    pub async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<Claim> {
        self.guard(
            ctx,
            "get_by_user_id",
            self.inner.get_by_user_id(ctx, user_id, cancel),
        )
        .await
    }

    pub async fn get_by_type(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        claim_type: &str,
        cancel: &CancellationToken,
    ) -> Vec<Claim> {
        self.guard(
            ctx,
            "get_by_type",
            self.inner.get_by_type(ctx, user_id, claim_type, cancel),
        )
        .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        claim: Claim,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, claim, cancel))
            .await
    }

    pub async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "delete", self.inner.delete(ctx, id, cancel))
            .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub ClaimStore {}

    #[async_trait]
    impl EntityStore for ClaimStore {
        type Entity = Claim;

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
        ) -> AppResult<Option<Claim>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: Claim,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Claim>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Claim>;
    }

    #[async_trait]
    impl ClaimStore for ClaimStore {
        async fn get_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<Claim>>;

        async fn get_by_type(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            claim_type: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<Claim>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            claim: Claim,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn delete(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}
