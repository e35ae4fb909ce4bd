//! Sign-in session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, Session};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Session data-access contract.
#[async_trait]
pub trait SessionStore: EntityStore<Entity = Session> {
    async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Session>>;

    /// Sessions of a user that are neither revoked nor expired at `at`
    async fn get_active_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Session>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        session: Session,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn revoke(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Sign a user out everywhere, returning the number of sessions revoked
    async fn revoke_all_by_user(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;

    async fn delete_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn SessionStore {
    const NAME: &'static str = "SessionRepository";
}

pub type SessionRepository = SafeRepository<dyn SessionStore>;

impl SessionRepository {
    pub async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<Session> {
        self.guard(
            ctx,
            "get_by_user_id",
            self.inner.get_by_user_id(ctx, user_id, cancel),
        )
        .await
    }

    pub async fn get_active_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Vec<Session> {
        self.guard(
            ctx,
            "get_active_by_user_id",
            self.inner.get_active_by_user_id(ctx, user_id, at, cancel),
        )
        .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        session: Session,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, session, cancel))
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

    pub async fn revoke_all_by_user(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        revoked_at: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "revoke_all_by_user",
            self.inner
                .revoke_all_by_user(ctx, user_id, revoked_at, cancel),
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
    pub SessionStore {}

    #[async_trait]
    impl EntityStore for SessionStore {
        type Entity = Session;

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
        ) -> AppResult<Option<Session>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: Session,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Session>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<Session>;
    }

    #[async_trait]
    impl SessionStore for SessionStore {
        async fn get_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<Session>>;

        async fn get_active_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<Session>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            session: Session,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn revoke(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            revoked_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn revoke_all_by_user(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            revoked_at: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;

        async fn delete_expired(
            &self,
            ctx: &ExecutionContext,
            reference_date: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
