//! Consent term repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use common::AppResult;
use domain::{ConsentTerm, ExecutionContext};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

#[async_trait]
pub trait ConsentTermStore: EntityStore<Entity = ConsentTerm> {
    async fn get_by_version(
        &self,
        ctx: &ExecutionContext,
        version: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<ConsentTerm>>;

    /// Most recently published term
    async fn get_latest(
        &self,
        ctx: &ExecutionContext,
        cancel: &CancellationToken,
    ) -> AppResult<Option<ConsentTerm>>;

    /// Terms in effect at the given instant
    async fn get_active(
        &self,
        ctx: &ExecutionContext,
        at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ConsentTerm>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        term: ConsentTerm,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn ConsentTermStore {
    const NAME: &'static str = "ConsentTermRepository";
}

pub type ConsentTermRepository = SafeRepository<dyn ConsentTermStore>;

impl ConsentTermRepository {
    pub async fn get_by_version(
        &self,
        ctx: &ExecutionContext,
        version: &str,
        cancel: &CancellationToken,
    ) -> Option<ConsentTerm> {
        self.guard(
            ctx,
            "get_by_version",
            self.inner.get_by_version(ctx, version, cancel),
        )
        .await
    }

    pub async fn get_latest(
        &self,
        ctx: &ExecutionContext,
        cancel: &CancellationToken,
    ) -> Option<ConsentTerm> {
        self.guard(ctx, "get_latest", self.inner.get_latest(ctx, cancel))
            .await
    }

    pub async fn get_active(
        &self,
        ctx: &ExecutionContext,
        at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Vec<ConsentTerm> {
        self.guard(ctx, "get_active", self.inner.get_active(ctx, at, cancel))
            .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        term: ConsentTerm,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, term, cancel))
            .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub ConsentTermStore {}

    #[async_trait]
    impl EntityStore for ConsentTermStore {
        type Entity = ConsentTerm;

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
        ) -> AppResult<Option<ConsentTerm>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: ConsentTerm,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ConsentTerm>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ConsentTerm>;
    }

    #[async_trait]
    impl ConsentTermStore for ConsentTermStore {
        async fn get_by_version(
            &self,
            ctx: &ExecutionContext,
            version: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<ConsentTerm>>;

        async fn get_latest(
            &self,
            ctx: &ExecutionContext,
            cancel: &CancellationToken,
        ) -> AppResult<Option<ConsentTerm>>;

        async fn get_active(
            &self,
            ctx: &ExecutionContext,
            at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<ConsentTerm>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            term: ConsentTerm,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}
