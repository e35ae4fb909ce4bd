//! Idempotency record repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use common::AppResult;
use domain::{ExecutionContext, IdempotencyRecord};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Idempotency record data-access contract.
#[async_trait]
pub trait IdempotencyRecordStore: EntityStore<Entity = IdempotencyRecord> {
    /// Find the record stored for an `Idempotency-Key` header value
    async fn get_by_key(
        &self,
        ctx: &ExecutionContext,
        idempotency_key: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<IdempotencyRecord>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        record: IdempotencyRecord,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn delete_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn IdempotencyRecordStore {
    const NAME: &'static str = "IdempotencyRecordRepository";
}

pub type IdempotencyRecordRepository = SafeRepository<dyn IdempotencyRecordStore>;

impl IdempotencyRecordRepository {
    pub async fn get_by_key(
        &self,
        ctx: &ExecutionContext,
        idempotency_key: &str,
        cancel: &CancellationToken,
    ) -> Option<IdempotencyRecord> {
        self.guard(
            ctx,
            "get_by_key",
            self.inner.get_by_key(ctx, idempotency_key, cancel),
        )
        .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        record: IdempotencyRecord,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, record, cancel))
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
    pub IdempotencyRecordStore {}

    #[async_trait]
    impl EntityStore for IdempotencyRecordStore {
        type Entity = IdempotencyRecord;

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
        ) -> AppResult<Option<IdempotencyRecord>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: IdempotencyRecord,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<IdempotencyRecord>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<IdempotencyRecord>;
    }

    #[async_trait]
    impl IdempotencyRecordStore for IdempotencyRecordStore {
        async fn get_by_key(
            &self,
            ctx: &ExecutionContext,
            idempotency_key: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<IdempotencyRecord>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            record: IdempotencyRecord,
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
