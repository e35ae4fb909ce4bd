//! Role claim repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, RoleClaim};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

#[async_trait]
pub trait RoleClaimStore: EntityStore<Entity = RoleClaim> {
    async fn get_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<RoleClaim>>;

    async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Remove every claim of a role, returning the count
    async fn delete_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn RoleClaimStore {
    const NAME: &'static str = "RoleClaimRepository";
}

pub type RoleClaimRepository = SafeRepository<dyn RoleClaimStore>;

impl RoleClaimRepository {
    pub async fn get_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<RoleClaim> {
        self.guard(
            ctx,
            "get_by_role_id",
            self.inner.get_by_role_id(ctx, role_id, cancel),
        )
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

    pub async fn delete_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "delete_by_role_id",
            self.inner.delete_by_role_id(ctx, role_id, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub RoleClaimStore {}

    #[async_trait]
    impl EntityStore for RoleClaimStore {
        type Entity = RoleClaim;

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
        ) -> AppResult<Option<RoleClaim>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: RoleClaim,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RoleClaim>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RoleClaim>;
    }

    #[async_trait]
    impl RoleClaimStore for RoleClaimStore {
        async fn get_by_role_id(
            &self,
            ctx: &ExecutionContext,
            role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<RoleClaim>>;

        async fn delete(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn delete_by_role_id(
            &self,
            ctx: &ExecutionContext,
            role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
