//! Access token deny list repository.
//!
//! Entries are kept until the revoked token would have expired on its own;
//! `delete_expired` is run periodically to prune them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;

use common::AppResult;
use domain::{DenyListEntry, ExecutionContext};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// Deny list data-access contract.
#[async_trait]
pub trait DenyListEntryStore: EntityStore<Entity = DenyListEntry> {
    async fn get_by_jti(
        &self,
        ctx: &ExecutionContext,
        jti: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<DenyListEntry>>;

    /// Check whether a token identifier is denied
    async fn exists_by_jti(
        &self,
        ctx: &ExecutionContext,
        jti: &str,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Delete entries expired before `reference_date`, returning the count
    async fn delete_expired(
        &self,
        ctx: &ExecutionContext,
        reference_date: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> AppResult<u64>;
}

impl RepositoryLabel for dyn DenyListEntryStore {
    const NAME: &'static str = "DenyListEntryRepository";
}

pub type DenyListEntryRepository = SafeRepository<dyn DenyListEntryStore>;

impl DenyListEntryRepository {
    pub async fn get_by_jti(
        &self,
        ctx: &ExecutionContext,
        jti: &str,
        cancel: &CancellationToken,
    ) -> Option<DenyListEntry> {
        self.guard(ctx, "get_by_jti", self.inner.get_by_jti(ctx, jti, cancel))
            .await
    }

    pub async fn exists_by_jti(
        &self,
        ctx: &ExecutionContext,
        jti: &str,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_by_jti",
            self.inner.exists_by_jti(ctx, jti, cancel),
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
    pub DenyListEntryStore {}

    #[async_trait]
    impl EntityStore for DenyListEntryStore {
        type Entity = DenyListEntry;

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
        ) -> AppResult<Option<DenyListEntry>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: DenyListEntry,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<DenyListEntry>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: DateTime<Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<DenyListEntry>;
    }

    #[async_trait]
    impl DenyListEntryStore for DenyListEntryStore {
        async fn get_by_jti(
            &self,
            ctx: &ExecutionContext,
            jti: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<DenyListEntry>>;

        async fn exists_by_jti(
            &self,
            ctx: &ExecutionContext,
            jti: &str,
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;
    use mockall::predicate::{always, eq};
    use uuid::Uuid;

    use super::*;
    use crate::testing::{capture_logs, store_failure, test_context, test_tenant_id, token};

    fn create_test_entry(jti: &str) -> DenyListEntry {
        let now = Utc::now();
        DenyListEntry {
            id: Uuid::new_v4(),
            tenant_id: test_tenant_id(),
            jti: jti.to_string(),
            reason: Some("logout".to_string()),
            expires_at: now + Duration::minutes(15),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_delete_expired_returns_store_count() {
        let reference_date = Utc::now();

        let mut store = MockDenyListEntryStore::new();
        store
            .expect_delete_expired()
            .with(always(), eq(reference_date), always())
            .times(1)
            .returning(|_, _, _| Ok(5));

        let repo = DenyListEntryRepository::new(Arc::new(store));
        let deleted = repo
            .delete_expired(&test_context(), reference_date, &token())
            .await;

        assert_eq!(deleted, 5);
    }

    #[tokio::test]
    async fn test_delete_expired_returns_zero_when_nothing_expired() {
        let (logs, _guard) = capture_logs();

        let mut store = MockDenyListEntryStore::new();
        store
            .expect_delete_expired()
            .times(1)
            .returning(|_, _, _| Ok(0));

        let repo = DenyListEntryRepository::new(Arc::new(store));
        let deleted = repo
            .delete_expired(&test_context(), Utc::now(), &token())
            .await;

        assert_eq!(deleted, 0);
        assert_eq!(logs.error_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_expired_returns_zero_on_failure() {
        let (logs, _guard) = capture_logs();

        let mut store = MockDenyListEntryStore::new();
        store
            .expect_delete_expired()
            .times(1)
            .returning(|_, _, _| Err(store_failure()));

        let repo = DenyListEntryRepository::new(Arc::new(store));
        let deleted = repo
            .delete_expired(&test_context(), Utc::now(), &token())
            .await;

        assert_eq!(deleted, 0);
        assert_eq!(logs.error_count(), 1);
        assert_eq!(logs.errors()[0].field("operation"), Some("delete_expired"));
    }

    #[tokio::test]
    async fn test_exists_by_jti() {
        let mut store = MockDenyListEntryStore::new();
        store
            .expect_exists_by_jti()
            .with(always(), eq("jti-revoked"), always())
            .returning(|_, _, _| Ok(true));
        store
            .expect_exists_by_jti()
            .with(always(), eq("jti-unknown"), always())
            .returning(|_, _, _| Ok(false));

        let repo = DenyListEntryRepository::new(Arc::new(store));
        let ctx = test_context();

        assert!(repo.exists_by_jti(&ctx, "jti-revoked", &token()).await);
        assert!(!repo.exists_by_jti(&ctx, "jti-unknown", &token()).await);
    }

    #[tokio::test]
    async fn test_get_by_jti_returns_entry() {
        let expected = create_test_entry("jti-42");
        let stored = expected.clone();

        let mut store = MockDenyListEntryStore::new();
        store
            .expect_get_by_jti()
            .returning(move |_, _, _| Ok(Some(stored.clone())));

        let repo = DenyListEntryRepository::new(Arc::new(store));
        let entry = repo.get_by_jti(&test_context(), "jti-42", &token()).await;

        assert_eq!(entry, Some(expected));
    }

    mod delegation {
        use std::sync::Arc;

        use chrono::Utc;
        use futures::stream::{self, StreamExt};
        use uuid::Uuid;

        use domain::PageRequest;

        use super::*;
        use crate::testing::{capture_logs, store_failure, test_context, token};

        #[tokio::test]
        async fn test_every_operation_returns_store_value() {
            let (logs, _guard) = capture_logs();
            let sample = create_test_entry("jti-sample");
            let ctx = test_context();
            let cancel = token();
            let id = Uuid::new_v4();
            let now = Utc::now();
            let page = PageRequest::default();

            let mut store = MockDenyListEntryStore::new();
            store
                .expect_exists()
                .times(1)
                .returning(|_, _, _| Ok(true));
            let item = sample.clone();
            store
                .expect_get_by_id()
                .times(1)
                .returning(move |_, _, _| Ok(Some(item.clone())));
            store
                .expect_register()
                .times(1)
                .returning(|_, _, _| Ok(true));
            let item = sample.clone();
            store
                .expect_get_by_jti()
                .times(1)
                .returning(move |_, _, _| Ok(Some(item.clone())));
            store
                .expect_exists_by_jti()
                .times(1)
                .returning(|_, _, _| Ok(true));
            store
                .expect_delete_expired()
                .times(1)
                .returning(|_, _, _| Ok(7));
            let item = sample.clone();
            store
                .expect_enumerate_all()
                .times(1)
                .returning(move |_, _, _| stream::iter(vec![Ok(item.clone())]).boxed());
            let item = sample.clone();
            store
                .expect_enumerate_modified_since()
                .times(1)
                .returning(move |_, _, _, _| stream::iter(vec![Ok(item.clone())]).boxed());

            let repo = DenyListEntryRepository::new(Arc::new(store));
            assert!(repo.exists(&ctx, id, &cancel).await);
            let found = repo.get_by_id(&ctx, id, &cancel).await;
            assert_eq!(found, Some(sample.clone()));
            assert!(repo.register(&ctx, sample.clone(), &cancel).await);
            let found = repo.get_by_jti(&ctx, "sample", &cancel).await;
            assert_eq!(found, Some(sample.clone()));
            assert!(repo.exists_by_jti(&ctx, "sample", &cancel).await);
            assert_eq!(repo.delete_expired(&ctx, now, &cancel).await, 7);

            let mut visited = Vec::new();
            let done = repo
                .enumerate_all(&ctx, page, &cancel, |e| visited.push(e))
                .await;
            assert!(done);
            let done = repo
                .enumerate_modified_since(&ctx, now, page, &cancel, |e| visited.push(e))
                .await;
            assert!(done);
            assert_eq!(visited, vec![sample.clone(), sample]);
            assert_eq!(logs.error_count(), 0);
        }

        #[tokio::test]
        async fn test_every_operation_defaults_on_store_failure() {
            let (logs, _guard) = capture_logs();
            let sample = create_test_entry("jti-sample");
            let ctx = test_context();
            let cancel = token();
            let id = Uuid::new_v4();
            let now = Utc::now();
            let page = PageRequest::default();

            let mut store = MockDenyListEntryStore::new();
            store
                .expect_exists()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_get_by_id()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_register()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_get_by_jti()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_exists_by_jti()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_delete_expired()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_enumerate_all()
                .times(1)
                .returning(|_, _, _| stream::once(async { Err(store_failure()) }).boxed());
            store
                .expect_enumerate_modified_since()
                .times(1)
                .returning(|_, _, _, _| stream::once(async { Err(store_failure()) }).boxed());

            let repo = DenyListEntryRepository::new(Arc::new(store));
            assert!(!repo.exists(&ctx, id, &cancel).await);
            assert!(repo.get_by_id(&ctx, id, &cancel).await.is_none());
            assert!(!repo.register(&ctx, sample.clone(), &cancel).await);
            assert!(repo.get_by_jti(&ctx, "sample", &cancel).await.is_none());
            assert!(!repo.exists_by_jti(&ctx, "sample", &cancel).await);
            assert_eq!(repo.delete_expired(&ctx, now, &cancel).await, 0);
            assert!(!repo.enumerate_all(&ctx, page, &cancel, |_| {}).await);
            let done = repo
                .enumerate_modified_since(&ctx, now, page, &cancel, |_| {})
                .await;
            assert!(!done);

            assert_eq!(
                logs.failed_operations(),
                vec![
                    "exists",
                    "get_by_id",
                    "register",
                    "enumerate_all",
                    "enumerate_modified_since",
                    "get_by_jti",
                    "exists_by_jti",
                    "delete_expired",
                ]
            );
            assert!(logs
                .errors()
                .iter()
                .all(|e| e.field("repository") == Some("DenyListEntryRepository")));
        }
    }
}
