//! Refresh token repository.
//!
//! Tokens rotate within a family; reuse of a rotated token is detected by the
//! caller looking up the family and revoking it as a whole.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, RefreshToken};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Refresh token data-access contract.
#[async_trait]
pub trait RefreshTokenStore: EntityStore<Entity = RefreshToken> {
    async fn get_by_token_hash(
        &self,
        ctx: &ExecutionContext,
        token_hash: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<RefreshToken>>;

    /// All tokens issued in one rotation family
    async fn get_by_family_id(
        &self,
        ctx: &ExecutionContext,
        family_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<RefreshToken>>;

    async fn revoke(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Revoke every active token of a user, returning the count
    async fn revoke_all_by_user(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;

    async fn remove_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn RefreshTokenStore {
    const NAME: &'static str = "RefreshTokenRepository";
}

pub type RefreshTokenRepository = SafeRepository<dyn RefreshTokenStore>;

impl RefreshTokenRepository {
    pub async fn get_by_token_hash(
        &self,
        ctx: &ExecutionContext,
        token_hash: &str,
        cancel: &CancellationToken,
    ) -> Option<RefreshToken> {
        self.guard(
            ctx,
            "get_by_token_hash",
            self.inner.get_by_token_hash(ctx, token_hash, cancel),
        )
        .await
    }

    pub async fn get_by_family_id(
        &self,
        ctx: &ExecutionContext,
        family_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<RefreshToken> {
        self.guard(
            ctx,
            "get_by_family_id",
            self.inner.get_by_family_id(ctx, family_id, cancel),
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

    pub async fn revoke_all_by_user(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "revoke_all_by_user",
            self.inner
                .revoke_all_by_user(ctx, user_id, revoked_at, cancel),
        )
        .await
    }

    pub async fn remove_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "remove_expired",
            self.inner.remove_expired(ctx, reference_date, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub RefreshTokenStore {}

    #[async_trait]
    impl EntityStore for RefreshTokenStore {
        type Entity = RefreshToken;

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
        ) -> AppResult<Option<RefreshToken>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: RefreshToken,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RefreshToken>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<RefreshToken>;
    }

    #[async_trait]
    impl RefreshTokenStore for RefreshTokenStore {
        async fn get_by_token_hash(
            &self,
            ctx: &ExecutionContext,
            token_hash: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<RefreshToken>>;

        async fn get_by_family_id(
            &self,
            ctx: &ExecutionContext,
            family_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<RefreshToken>>;

        async fn revoke(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            revoked_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn revoke_all_by_user(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            revoked_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;

        async fn remove_expired(
            &self,
            ctx: &ExecutionContext,
            reference_date: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
