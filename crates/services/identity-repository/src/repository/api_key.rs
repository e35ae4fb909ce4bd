//! API key repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ApiKey, ExecutionContext};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// API key data-access contract.
#[async_trait]
pub trait ApiKeyStore: EntityStore<Entity = ApiKey> {
    /// Find key by the hash of its secret
    async fn get_by_key_hash(
        &self,
        ctx: &ExecutionContext,
        key_hash: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<ApiKey>>;

    /// List all keys issued to a user
    async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ApiKey>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        api_key: ApiKey,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn revoke(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Delete keys that expired before `reference_date`, returning the count
    async fn delete_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn ApiKeyStore {
    const NAME: &'static str = "ApiKeyRepository";
}

pub type ApiKeyRepository = SafeRepository<dyn ApiKeyStore>;

impl ApiKeyRepository {
    pub async fn get_by_key_hash(
        &self,
        ctx: &ExecutionContext,
        key_hash: &str,
        cancel: &CancellationToken,
    ) -> Option<ApiKey> {
        self.guard(
            ctx,
            "get_by_key_hash",
            self.inner.get_by_key_hash(ctx, key_hash, cancel),
        )
        .await
    }

    pub async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<ApiKey> {
        self.guard(
            ctx,
            "get_by_user_id",
            self.inner.get_by_user_id(ctx, user_id, cancel),
        )
        .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        api_key: ApiKey,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, api_key, cancel))
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
    pub ApiKeyStore {}

    #[async_trait]
    impl EntityStore for ApiKeyStore {
        type Entity = ApiKey;

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
        ) -> AppResult<Option<ApiKey>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: ApiKey,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ApiKey>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ApiKey>;
    }

    #[async_trait]
    impl ApiKeyStore for ApiKeyStore {
        async fn get_by_key_hash(
            &self,
            ctx: &ExecutionContext,
            key_hash: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<ApiKey>>;

        async fn get_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<ApiKey>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            api_key: ApiKey,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn revoke(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            revoked_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn delete_expired(
            &self,
            ctx: &ExecutionContext,
            reference_date: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
