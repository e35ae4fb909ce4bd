//! Impersonation session repository.
//!
//! Support staff may act as a customer for a bounded time; these sessions
//! are audited separately from regular sign-in sessions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, ImpersonationSession};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Impersonation session data-access contract.
#[async_trait]
pub trait ImpersonationSessionStore: EntityStore<Entity = ImpersonationSession> {
    /// Open sessions started by a staff member
    async fn get_active_by_impersonator(
        &self,
        ctx: &ExecutionContext,
        impersonator_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ImpersonationSession>>;

    /// Open sessions acting as the given user
    async fn get_active_by_target(
        &self,
        ctx: &ExecutionContext,
        target_user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ImpersonationSession>>;

    async fn end(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        ended_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// End every open session of a staff member, returning the count
    async fn end_all_by_impersonator(
        &self,
        ctx: &ExecutionContext,
        impersonator_id: Uuid,
        ended_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn ImpersonationSessionStore {
    const NAME: &'static str = "ImpersonationSessionRepository";
}

pub type ImpersonationSessionRepository = SafeRepository<dyn ImpersonationSessionStore>;

impl ImpersonationSessionRepository {
    pub async fn get_active_by_impersonator(
        &self,
        ctx: &ExecutionContext,
        impersonator_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<ImpersonationSession> {
        self.guard(
            ctx,
            "get_active_by_impersonator",
            self.inner
                .get_active_by_impersonator(ctx, impersonator_id, cancel),
        )
        .await
    }

    pub async fn get_active_by_target(
        &self,
        ctx: &ExecutionContext,
        target_user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<ImpersonationSession> {
        self.guard(
            ctx,
            "get_active_by_target",
            self.inner.get_active_by_target(ctx, target_user_id, cancel),
        )
        .await
    }

    pub async fn end(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        ended_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "end", self.inner.end(ctx, id, ended_at, cancel))
            .await
    }

    pub async fn end_all_by_impersonator(
        &self,
        ctx: &ExecutionContext,
        impersonator_id: Uuid,
        ended_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "end_all_by_impersonator",
            self.inner
                .end_all_by_impersonator(ctx, impersonator_id, ended_at, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub ImpersonationSessionStore {}

    #[async_trait]
    impl EntityStore for ImpersonationSessionStore {
        type Entity = ImpersonationSession;

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
        ) -> AppResult<Option<ImpersonationSession>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: ImpersonationSession,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ImpersonationSession>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ImpersonationSession>;
    }

    #[async_trait]
    impl ImpersonationSessionStore for ImpersonationSessionStore {
        async fn get_active_by_impersonator(
            &self,
            ctx: &ExecutionContext,
            impersonator_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<ImpersonationSession>>;

        async fn get_active_by_target(
            &self,
            ctx: &ExecutionContext,
            target_user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<ImpersonationSession>>;

        async fn end(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            ended_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn end_all_by_impersonator(
            &self,
            ctx: &ExecutionContext,
            impersonator_id: Uuid,
            ended_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
