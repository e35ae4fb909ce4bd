//! MFA recovery code repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, RecoveryCode};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Recovery code data-access contract.
#[async_trait]
pub trait RecoveryCodeStore: EntityStore<Entity = RecoveryCode> {
    async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<RecoveryCode>>;

    /// Find an unused code of a user by its hash
    async fn get_unused_by_code_hash(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        code_hash: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<RecoveryCode>>;

    async fn mark_used(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        used_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Delete all codes of a user (on regeneration), returning the count
    async fn delete_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn RecoveryCodeStore {
    const NAME: &'static str = "RecoveryCodeRepository";
}

pub type RecoveryCodeRepository = SafeRepository<dyn RecoveryCodeStore>;

impl RecoveryCodeRepository {
    pub async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<RecoveryCode> {
        self.guard(
            ctx,
            "get_by_user_id",
            self.inner.get_by_user_id(ctx, user_id, cancel),
        )
        .await
    }

    pub async fn get_unused_by_code_hash(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        code_hash: &str,
        cancel: &CancellationToken,
    ) -> Option<RecoveryCode> {
        self.guard(
            ctx,
            "get_unused_by_code_hash",
            self.inner
                .get_unused_by_code_hash(ctx, user_id, code_hash, cancel),
        )
        .await
    }

    pub async fn mark_used(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        used_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "mark_used",
            self.inner.mark_used(ctx, id, used_at, cancel),
        )
        .await
    }

    pub async fn delete_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "delete_by_user_id",
            self.inner.delete_by_user_id(ctx, user_id, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub RecoveryCodeStore {}

    #[async_trait]
    impl EntityStore for RecoveryCodeStore {
        type Entity = RecoveryCode;

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
        ) -> AppResult<Option<RecoveryCode>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: RecoveryCode,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RecoveryCode>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RecoveryCode>;
    }

    #[async_trait]
    impl RecoveryCodeStore for RecoveryCodeStore {
        async fn get_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<RecoveryCode>>;

        async fn get_unused_by_code_hash(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            code_hash: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<RecoveryCode>>;

        async fn mark_used(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            used_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn delete_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
