//! Machine-to-machine client repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, ServiceClient};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Service client data-access contract.
#[async_trait]
pub trait ServiceClientStore: EntityStore<Entity = ServiceClient> {
    /// Find client by its public client ID
    async fn get_by_client_id(
        &self,
        ctx: &ExecutionContext,
        client_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<ServiceClient>>;

    async fn exists_by_client_id(
        &self,
        ctx: &ExecutionContext,
        client_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        client: ServiceClient,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn ServiceClientStore {
    const NAME: &'static str = "ServiceClientRepository";
}

pub type ServiceClientRepository = SafeRepository<dyn ServiceClientStore>;

impl ServiceClientRepository {
    pub async fn get_by_client_id(
        &self,
        ctx: &ExecutionContext,
        client_id: &str,
        cancel: &CancellationToken,
    ) -> Option<ServiceClient> {
        self.guard(
            ctx,
            "get_by_client_id",
            self.inner.get_by_client_id(ctx, client_id, cancel),
        )
        .await
    }

    pub async fn exists_by_client_id(
        &self,
        ctx: &ExecutionContext,
        client_id: &str,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_by_client_id",
            self.inner.exists_by_client_id(ctx, client_id, cancel),
        )
        .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        client: ServiceClient,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, client, cancel))
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
    pub ServiceClientStore {}

    #[async_trait]
    impl EntityStore for ServiceClientStore {
        type Entity = ServiceClient;

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
        ) -> AppResult<Option<ServiceClient>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: ServiceClient,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ServiceClient>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ServiceClient>;
    }

    #[async_trait]
    impl ServiceClientStore for ServiceClientStore {
        async fn get_by_client_id(
            &self,
            ctx: &ExecutionContext,
            client_id: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<ServiceClient>>;

        async fn exists_by_client_id(
            &self,
            ctx: &ExecutionContext,
            client_id: &str,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            client: ServiceClient,
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
