//! Role hierarchy repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, RoleHierarchy};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Role inheritance edge data-access contract.
#[async_trait]
pub trait RoleHierarchyStore: EntityStore<Entity = RoleHierarchy> {
    /// Edges whose parent is the given role
    async fn get_children(
        &self,
        ctx: &ExecutionContext,
        parent_role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<RoleHierarchy>>;

    /// Edges whose child is the given role
    async fn get_parents(
        &self,
        ctx: &ExecutionContext,
        child_role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<RoleHierarchy>>;

    async fn exists_edge(
        &self,
        ctx: &ExecutionContext,
        parent_role_id: Uuid,
        child_role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn RoleHierarchyStore {
    const NAME: &'static str = "RoleHierarchyRepository";
}

pub type RoleHierarchyRepository = SafeRepository<dyn RoleHierarchyStore>;

impl RoleHierarchyRepository {
    pub async fn get_children(
        &self,
        ctx: &ExecutionContext,
        parent_role_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<RoleHierarchy> {
        self.guard(
            ctx,
            "get_children",
            self.inner.get_children(ctx, parent_role_id, cancel),
        )
        .await
    }

    pub async fn get_parents(
        &self,
        ctx: &ExecutionContext,
        child_role_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<RoleHierarchy> {
        self.guard(
            ctx,
            "get_parents",
            self.inner.get_parents(ctx, child_role_id, cancel),
        )
        .await
    }

    pub async fn exists_edge(
        &self,
        ctx: &ExecutionContext,
        parent_role_id: Uuid,
        child_role_id: Uuid,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_edge",
            self.inner
                .exists_edge(ctx, parent_role_id, child_role_id, cancel),
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
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub RoleHierarchyStore {}

    #[async_trait]
    impl EntityStore for RoleHierarchyStore {
        type Entity = RoleHierarchy;

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
        ) -> AppResult<Option<RoleHierarchy>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: RoleHierarchy,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RoleHierarchy>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RoleHierarchy>;
    }

    #[async_trait]
    impl RoleHierarchyStore for RoleHierarchyStore {
        async fn get_children(
            &self,
            ctx: &ExecutionContext,
            parent_role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<RoleHierarchy>>;

        async fn get_parents(
            &self,
            ctx: &ExecutionContext,
            child_role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<RoleHierarchy>>;

        async fn exists_edge(
            &self,
            ctx: &ExecutionContext,
            parent_role_id: Uuid,
            child_role_id: Uuid,
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
