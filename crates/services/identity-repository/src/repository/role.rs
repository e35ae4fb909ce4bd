//! Role repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, Role};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Role data-access contract.
#[async_trait]
pub trait RoleStore: EntityStore<Entity = Role> {
    /// Find role by name (matched on the normalized form)
    async fn get_by_name(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Role>>;

    async fn exists_by_name(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Load several roles at once; unknown IDs are skipped
    async fn get_by_ids(
        &self,
        ctx: &ExecutionContext,
        ids: Vec<Uuid>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Role>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        role: Role,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn RoleStore {
    const NAME: &'static str = "RoleRepository";
}

pub type RoleRepository = SafeRepository<dyn RoleStore>;

impl RoleRepository {
    pub async fn get_by_name(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> Option<Role> {
        self.guard(
            ctx,
            "get_by_name",
            self.inner.get_by_name(ctx, name, cancel),
        )
        .await
    }

    pub async fn exists_by_name(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_by_name",
            self.inner.exists_by_name(ctx, name, cancel),
        )
        .await
    }

    pub async fn get_by_ids(
        &self,
        ctx: &ExecutionContext,
        ids: Vec<Uuid>,
        cancel: &CancellationToken,
    ) -> Vec<Role> {
        self.guard(ctx, "get_by_ids", self.inner.get_by_ids(ctx, ids, cancel))
            .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        role: Role,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, role, cancel))
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
    pub RoleStore {}

    #[async_trait]
    impl EntityStore for RoleStore {
        type Entity = Role;

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
        ) -> AppResult<Option<Role>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: Role,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Role>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Role>;
    }

    #[async_trait]
    impl RoleStore for RoleStore {
        async fn get_by_name(
            &self,
            ctx: &ExecutionContext,
            name: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<Role>>;

        async fn exists_by_name(
            &self,
            ctx: &ExecutionContext,
            name: &str,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn get_by_ids(
            &self,
            ctx: &ExecutionContext,
            ids: Vec<Uuid>,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<Role>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            role: Role,
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
