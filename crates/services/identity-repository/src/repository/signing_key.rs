//! Token signing key repository.
//!
//! Private key material is stored encrypted; this layer never decrypts it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use common::AppResult;
use domain::{ExecutionContext, SigningKey};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Signing key data-access contract.
#[async_trait]
pub trait SigningKeyStore: EntityStore<Entity = SigningKey> {
    /// Find key by its published `kid`
    async fn get_by_key_id(
        &self,
        ctx: &ExecutionContext,
        key_id: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<SigningKey>>;

    /// The active key used to sign new tokens with `algorithm`
    async fn get_current(
        &self,
        ctx: &ExecutionContext,
        algorithm: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<SigningKey>>;

    /// Keys valid for verification at `at` (the JWKS set)
    async fn get_active(
        &self,
        ctx: &ExecutionContext,
        at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<SigningKey>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        key: SigningKey,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn SigningKeyStore {
    const NAME: &'static str = "SigningKeyRepository";
}

pub type SigningKeyRepository = SafeRepository<dyn SigningKeyStore>;

impl SigningKeyRepository {
    pub async fn get_by_key_id(
        &self,
        ctx: &ExecutionContext,
        key_id: &str,
        cancel: &CancellationToken,
    ) -> Option<SigningKey> {
        self.guard(
            ctx,
            "get_by_key_id",
            self.inner.get_by_key_id(ctx, key_id, cancel),
        )
        .await
    }

    pub async fn get_current(
        &self,
        ctx: &ExecutionContext,
        algorithm: &str,
        cancel: &CancellationToken,
    ) -> Option<SigningKey> {
        self.guard(
            ctx,
            "get_current",
            self.inner.get_current(ctx, algorithm, cancel),
        )
        .await
    }

    pub async fn get_active(
        &self,
        ctx: &ExecutionContext,
        at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Vec<SigningKey> {
        self.guard(ctx, "get_active", self.inner.get_active(ctx, at, cancel))
            .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        key: SigningKey,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, key, cancel))
            .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub SigningKeyStore {}

    #[async_trait]
    impl EntityStore for SigningKeyStore {
        type Entity = SigningKey;

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
        ) -> AppResult<Option<SigningKey>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: SigningKey,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<SigningKey>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<SigningKey>;
    }

    #[async_trait]
    impl SigningKeyStore for SigningKeyStore {
        async fn get_by_key_id(
            &self,
            ctx: &ExecutionContext,
            key_id: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<SigningKey>>;

        async fn get_current(
            &self,
            ctx: &ExecutionContext,
            algorithm: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<SigningKey>>;

        async fn get_active(
            &self,
            ctx: &ExecutionContext,
            at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<SigningKey>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            key: SigningKey,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}
