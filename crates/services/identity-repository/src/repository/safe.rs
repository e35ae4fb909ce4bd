//! Generic safe-delegation repository.
//!
//! `SafeRepository<S>` forwards every call to its inner store exactly once.
//! Successful results are returned unchanged; a failed call is logged once at
//! error level and replaced by `Default::default()` of the operation's result
//! type (`None`, an empty `Vec`, `false` or `0`).

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{ExecutionContext, PageRequest};

/// Stream of entities produced by an enumeration.
pub type EntityStream<T> = BoxStream<'static, AppResult<T>>;

/// Operations every identity store supports, whatever the entity.
///
/// Implementations own the persistence logic; the cancellation token is
/// passed through untouched by the safe repository.
#[async_trait]
pub trait EntityStore: Send + Sync {
    type Entity: Send + 'static;

    /// Check whether an entity with the given ID exists
    async fn exists(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Find entity by primary key
    async fn get_by_id(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Option<Self::Entity>>;

    /// Insert a new entity, returning whether it was stored
    async fn register(
        &self,
        ctx: &ExecutionContext,
        entity: Self::Entity,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Stream every entity of the tenant, one page window at a time
    fn enumerate_all(
        &self,
        ctx: &ExecutionContext,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> EntityStream<Self::Entity>;

    /// Stream entities created or updated after `since`
    fn enumerate_modified_since(
        &self,
        ctx: &ExecutionContext,
        since: DateTime<Utc>,
        page: PageRequest,
        cancel: &CancellationToken,
    ) -> EntityStream<Self::Entity>;
}

/// Name a repository reports in its log events.
pub trait RepositoryLabel {
    const NAME: &'static str;
}

/// Non-throwing facade over an entity store.
pub struct SafeRepository<S: ?Sized> {
    pub(super) inner: Arc<S>,
}

impl<S: ?Sized> Clone for SafeRepository<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> SafeRepository<S>
where
    S: EntityStore + RepositoryLabel + ?Sized,
{
    /// Wrap an inner store
    pub fn new(inner: Arc<S>) -> Self {
        Self { inner }
    }

    /// Repository name used in log events
    pub fn name(&self) -> &'static str {
        S::NAME
    }

    pub async fn exists(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "exists", self.inner.exists(ctx, id, cancel))
            .await
    }

    pub async fn get_by_id(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> Option<S::Entity> {
        self.guard(ctx, "get_by_id", self.inner.get_by_id(ctx, id, cancel))
            .await
    }

    pub async fn register(
        &self,
        ctx: &ExecutionContext,
        entity: S::Entity,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "register", self.inner.register(ctx, entity, cancel))
            .await
    }

    /// Visit every entity of the tenant.
    ///
    /// Returns `true` once the inner stream is exhausted, `false` if it
    /// yielded an error (items visited before the error are not rolled back).
    pub async fn enumerate_all<F>(
        &self,
        ctx: &ExecutionContext,
        page: PageRequest,
        cancel: &CancellationToken,
        on_item: F,
    ) -> bool
    where
        F: FnMut(S::Entity),
    {
        let stream = self.inner.enumerate_all(ctx, page, cancel);
        self.drain(ctx, "enumerate_all", stream, on_item).await
    }

    /// Visit entities modified after `since`; same contract as `enumerate_all`.
    pub async fn enumerate_modified_since<F>(
        &self,
        ctx: &ExecutionContext,
        since: DateTime<Utc>,
        page: PageRequest,
        cancel: &CancellationToken,
        on_item: F,
    ) -> bool
    where
        F: FnMut(S::Entity),
    {
        let stream = self
            .inner
            .enumerate_modified_since(ctx, since, page, cancel);
        self.drain(ctx, "enumerate_modified_since", stream, on_item)
            .await
    }

    /// Await a delegated call, converting failure into the result type's default
    pub(super) async fn guard<T, F>(
        &self,
        ctx: &ExecutionContext,
        operation: &'static str,
        call: F,
    ) -> T
    where
        T: Default,
        F: Future<Output = AppResult<T>>,
    {
        match call.await {
            Ok(value) => value,
            Err(err) => {
                self.report(ctx, operation, &err);
                T::default()
            }
        }
    }

    async fn drain<F>(
        &self,
        ctx: &ExecutionContext,
        operation: &'static str,
        mut stream: EntityStream<S::Entity>,
        mut on_item: F,
    ) -> bool
    where
        F: FnMut(S::Entity),
    {
        let mut visited: u64 = 0;

        while let Some(item) = stream.next().await {
            match item {
                Ok(entity) => {
                    on_item(entity);
                    visited += 1;
                }
                Err(err) => {
                    self.report(ctx, operation, &err);
                    return false;
                }
            }
        }

        debug!(repository = S::NAME, operation, visited, "Enumeration completed");
        true
    }

    fn report(&self, ctx: &ExecutionContext, operation: &'static str, err: &AppError) {
        error!(
            repository = S::NAME,
            operation,
            tenant_id = %ctx.tenant.id,
            correlation_id = %ctx.correlation_id,
            error = ?err,
            "Repository operation failed"
        );
    }
}
