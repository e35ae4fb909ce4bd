//! DPoP proof key repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use common::AppResult;
use domain::{DpopKey, ExecutionContext};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// DPoP key data-access contract. Keys are looked up by JWK thumbprint (`jkt`).
#[async_trait]
pub trait DpopKeyStore: EntityStore<Entity = DpopKey> {
    async fn get_by_thumbprint(
        &self,
        ctx: &ExecutionContext,
        thumbprint: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<DpopKey>>;

    async fn exists_by_thumbprint(
        &self,
        ctx: &ExecutionContext,
        thumbprint: &str,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn delete_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn DpopKeyStore {
    const NAME: &'static str = "DpopKeyRepository";
}

pub type DpopKeyRepository = SafeRepository<dyn DpopKeyStore>;

impl DpopKeyRepository {
    pub async fn get_by_thumbprint(
        &self,
        ctx: &ExecutionContext,
        thumbprint: &str,
        cancel: &CancellationToken,
    ) -> Option<DpopKey> {
        self.guard(
            ctx,
            "get_by_thumbprint",
            self.inner.get_by_thumbprint(ctx, thumbprint, cancel),
        )
        .await
    }

    pub async fn exists_by_thumbprint(
        &self,
        ctx: &ExecutionContext,
        thumbprint: &str,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_by_thumbprint",
            self.inner.exists_by_thumbprint(ctx, thumbprint, cancel),
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
    pub DpopKeyStore {}

    #[async_trait]
    impl EntityStore for DpopKeyStore {
        type Entity = DpopKey;

        async fn exists(
            &self,
            ctx: &ExecutionContext,
            id: uuid::Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn get_by_id(
            &self,
            ctx: &ExecutionContext,
            id: uuid::Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Option<DpopKey>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: DpopKey,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<DpopKey>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<DpopKey>;
    }

    #[async_trait]
    impl DpopKeyStore for DpopKeyStore {
        async fn get_by_thumbprint(
            &self,
            ctx: &ExecutionContext,
            thumbprint: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<DpopKey>>;

        async fn exists_by_thumbprint(
            &self,
            ctx: &ExecutionContext,
            thumbprint: &str,
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
