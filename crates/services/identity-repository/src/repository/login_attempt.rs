//! Login attempt repository.
//!
//! Failed attempts feed the account lockout policy; a store failure counts
//! as zero failures, so lockout never triggers on a database outage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, LoginAttempt};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Login attempt data-access contract.
#[async_trait]
pub trait LoginAttemptStore: EntityStore<Entity = LoginAttempt> {
    /// Attempts for a user at or after `since`, newest first
    async fn get_recent_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        since: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<LoginAttempt>>;

    /// Number of failed attempts for an email/username since `since`
    async fn count_failed_since(
        &self,
        ctx: &ExecutionContext,
        identifier: &str,
        since: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;

    async fn delete_older_than(
        &self,
        ctx: &ExecutionContext,
        cutoff: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn LoginAttemptStore {
    const NAME: &'static str = "LoginAttemptRepository";
}

pub type LoginAttemptRepository = SafeRepository<dyn LoginAttemptStore>;

impl LoginAttemptRepository {
    pub async fn get_recent_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        since: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Vec<LoginAttempt> {
        self.guard(
            ctx,
            "get_recent_by_user_id",
            self.inner
                .get_recent_by_user_id(ctx, user_id, since, cancel),
        )
        .await
    }

    pub async fn count_failed_since(
        &self,
        ctx: &ExecutionContext,
        identifier: &str,
        since: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "count_failed_since",
            self.inner
                .count_failed_since(ctx, identifier, since, cancel),
        )
        .await
    }

    pub async fn delete_older_than(
        &self,
        ctx: &ExecutionContext,
        cutoff: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> u64 {
        self.guard(
            ctx,
            "delete_older_than",
            self.inner.delete_older_than(ctx, cutoff, cancel),
        )
        .await
    }
}

#[cfg(any(test, feature = "test-utils"))]
mockall::mock! {
    pub LoginAttemptStore {}

    #[async_trait]
    impl EntityStore for LoginAttemptStore {
        type Entity = LoginAttempt;

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
        ) -> AppResult<Option<LoginAttempt>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: LoginAttempt,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<LoginAttempt>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<LoginAttempt>;
    }

    #[async_trait]
    impl LoginAttemptStore for LoginAttemptStore {
        async fn get_recent_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            since: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<LoginAttempt>>;

        async fn count_failed_since(
            &self,
            ctx: &ExecutionContext,
            identifier: &str,
            since: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;

        async fn delete_older_than(
            &self,
            ctx: &ExecutionContext,
            cutoff: DateTime<Utc>,
            cancel: &CancellationToken,
        ) -> AppResult<u64>;
    }
}
