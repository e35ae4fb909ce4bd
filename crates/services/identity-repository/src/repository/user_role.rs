//! User-role assignment repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, UserRole};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// User-role assignment data-access contract.
#[async_trait]
pub trait UserRoleStore: EntityStore<Entity = UserRole> {
    async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<UserRole>>;

    async fn get_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<UserRole>>;

    async fn exists_assignment(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Remove a user from a role
    async fn delete(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn UserRoleStore {
    const NAME: &'static str = "UserRoleRepository";
}

pub type UserRoleRepository = SafeRepository<dyn UserRoleStore>;

impl UserRoleRepository {
    pub async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<UserRole> {
        self.guard(
            ctx,
            "get_by_user_id",
            self.inner.get_by_user_id(ctx, user_id, cancel),
        )
        .await
    }

    pub async fn get_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<UserRole> {
        self.guard(
            ctx,
            "get_by_role_id",
            self.inner.get_by_role_id(ctx, role_id, cancel),
        )
        .await
    }

    pub async fn exists_assignment(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_assignment",
            self.inner.exists_assignment(ctx, user_id, role_id, cancel),
        )
        .await
    }

    pub async fn delete(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "delete",
            self.inner.delete(ctx, user_id, role_id, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub UserRoleStore {}

    #[async_trait]
    impl EntityStore for UserRoleStore {
        type Entity = UserRole;

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
        ) -> AppResult<Option<UserRole>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: UserRole,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<UserRole>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<UserRole>;
    }

    #[async_trait]
    impl UserRoleStore for UserRoleStore {
        async fn get_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<UserRole>>;

        async fn get_by_role_id(
            &self,
            ctx: &ExecutionContext,
            role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<UserRole>>;

        async fn exists_assignment(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn delete(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}
