//! Signing key chain repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use common::AppResult;
use domain::{ExecutionContext, KeyChain};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

#[async_trait]
pub trait KeyChainStore: EntityStore<Entity = KeyChain> {
    async fn get_by_name(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<KeyChain>>;

    /// Chains currently participating in rotation
    async fn get_active(
        &self,
        ctx: &ExecutionContext,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<KeyChain>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        key_chain: KeyChain,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn KeyChainStore {
    const NAME: &'static str = "KeyChainRepository";
}

pub type KeyChainRepository = SafeRepository<dyn KeyChainStore>;

impl KeyChainRepository {
    pub async fn get_by_name(
        &self,
        ctx: &ExecutionContext,
        name: &str,
        cancel: &CancellationToken,
    ) -> Option<KeyChain> {
        self.guard(
            ctx,
            "get_by_name",
            self.inner.get_by_name(ctx, name, cancel),
        )
        .await
    }

    pub async fn get_active(
        &self,
        ctx: &ExecutionContext,
        cancel: &CancellationToken,
    ) -> Vec<KeyChain> {
        self.guard(ctx, "get_active", self.inner.get_active(ctx, cancel))
            .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        key_chain: KeyChain,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, key_chain, cancel))
            .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub KeyChainStore {}

    #[async_trait]
    impl EntityStore for KeyChainStore {
        type Entity = KeyChain;

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
        ) -> AppResult<Option<KeyChain>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: KeyChain,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<KeyChain>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<KeyChain>;
    }

    #[async_trait]
    impl KeyChainStore for KeyChainStore {
        async fn get_by_name(
            &self,
            ctx: &ExecutionContext,
            name: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<KeyChain>>;

        async fn get_active(
            &self,
            ctx: &ExecutionContext,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<KeyChain>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            key_chain: KeyChain,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}
