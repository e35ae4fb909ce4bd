//! Tenant repository.
//!
//! Tenant lookups run before a tenant context exists, so callers pass the
//! system context (`ExecutionContext::system()`).

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use common::AppResult;
use domain::{ExecutionContext, Tenant};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Tenant data-access contract.
#[async_trait]
pub trait TenantStore: EntityStore<Entity = Tenant> {
    /// Find tenant by its slug
    async fn get_by_identifier(
        &self,
        ctx: &ExecutionContext,
        identifier: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Tenant>>;

    /// Resolve the tenant serving a host name
    async fn get_by_domain(
        &self,
        ctx: &ExecutionContext,
        domain: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Tenant>>;

    async fn exists_by_domain(
        &self,
        ctx: &ExecutionContext,
        domain: &str,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        tenant: Tenant,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn TenantStore {
    const NAME: &'static str = "TenantRepository";
}

pub type TenantRepository = SafeRepository<dyn TenantStore>;

impl TenantRepository {
    pub async fn get_by_identifier(
        &self,
        ctx: &ExecutionContext,
        identifier: &str,
        cancel: &CancellationToken,
    ) -> Option<Tenant> {
        self.guard(
            ctx,
            "get_by_identifier",
            self.inner.get_by_identifier(ctx, identifier, cancel),
        )
        .await
    }

    pub async fn get_by_domain(
        &self,
        ctx: &ExecutionContext,
        domain: &str,
        cancel: &CancellationToken,
    ) -> Option<Tenant> {
        self.guard(
            ctx,
            "get_by_domain",
            self.inner.get_by_domain(ctx, domain, cancel),
        )
        .await
    }

    pub async fn exists_by_domain(
        &self,
        ctx: &ExecutionContext,
        domain: &str,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_by_domain",
            self.inner.exists_by_domain(ctx, domain, cancel),
        )
        .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        tenant: Tenant,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, tenant, cancel))
            .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub TenantStore {}

    #[async_trait]
    impl EntityStore for TenantStore {
        type Entity = Tenant;

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
        ) -> AppResult<Option<Tenant>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: Tenant,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Tenant>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Tenant>;
    }

    #[async_trait]
    impl TenantStore for TenantStore {
        async fn get_by_identifier(
            &self,
            ctx: &ExecutionContext,
            identifier: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<Tenant>>;

        async fn get_by_domain(
            &self,
            ctx: &ExecutionContext,
            domain: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<Tenant>>;

        async fn exists_by_domain(
            &self,
            ctx: &ExecutionContext,
            domain: &str,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            tenant: Tenant,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}
