//! Password reset token repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, PasswordResetToken};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Password reset token data-access contract.
#[async_trait]
pub trait PasswordResetTokenStore: EntityStore<Entity = PasswordResetToken> {
    async fn get_by_token_hash(
        &self,
        ctx: &ExecutionContext,
        token_hash: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<PasswordResetToken>>;

    async fn mark_used(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        used_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Invalidate every outstanding token of a user, returning the count
    async fn invalidate_all_by_user(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;

    async fn delete_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn PasswordResetTokenStore {
    const NAME: &'static str = "PasswordResetTokenRepository";
}

pub type PasswordResetTokenRepository = SafeRepository<dyn PasswordResetTokenStore>;

impl PasswordResetTokenRepository {
    pub async fn get_by_token_hash(
        &self,
        ctx: &ExecutionContext,
        token_hash: &str,
        cancel: &CancellationToken,
    ) -> Option<PasswordResetToken> {
        self.guard(
            ctx,
            "get_by_token_hash",
            self.inner.get_by_token_hash(ctx, token_hash, cancel),
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

    pub async fn invalidate_all_by_user(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "invalidate_all_by_user",
            self.inner.invalidate_all_by_user(ctx, user_id, cancel),
        )
        .await
    }

    pub async fn delete_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "delete_expired",
            self.inner.delete_expired(ctx, reference_date, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub PasswordResetTokenStore {}

    #[async_trait]
    impl EntityStore for PasswordResetTokenStore {
        type Entity = PasswordResetToken;

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
        ) -> AppResult<Option<PasswordResetToken>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: PasswordResetToken,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<PasswordResetToken>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<PasswordResetToken>;
    }

    #[async_trait]
    impl PasswordResetTokenStore for PasswordResetTokenStore {
        async fn get_by_token_hash(
            &self,
            ctx: &ExecutionContext,
            token_hash: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<PasswordResetToken>>;

        async fn mark_used(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            used_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn invalidate_all_by_user(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;

        async fn delete_expired(
            &self,
            ctx: &ExecutionContext,
            reference_date: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
