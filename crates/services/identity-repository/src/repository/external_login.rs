//! External identity provider login repository.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, ExternalLogin};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// External login data-access contract.
#[async_trait]
pub trait ExternalLoginStore: EntityStore<Entity = ExternalLogin> {
    /// Find the link for a provider account
    async fn get_by_provider_key(
        &self,
        ctx: &ExecutionContext,
        provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<ExternalLogin>>;

    async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<ExternalLogin>>;

    async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn ExternalLoginStore {
    const NAME: &'static str = "ExternalLoginRepository";
}

pub type ExternalLoginRepository = SafeRepository<dyn ExternalLoginStore>;

impl ExternalLoginRepository {
    pub async fn get_by_provider_key(
        &self,
        ctx: &ExecutionContext,
        provider: &str,
        provider_key: &str,
        cancel: &CancellationToken,
    ) -> Option<ExternalLogin> {
        self.guard(
            ctx,
            "get_by_provider_key",
            self.inner
                .get_by_provider_key(ctx, provider, provider_key, cancel),
        )
        .await
    }

    pub async fn get_by_user_id(
        &self,
        ctx: &ExecutionContext,
        user_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<ExternalLogin> {
        self.guard(
            ctx,
            "get_by_user_id",
            self.inner.get_by_user_id(ctx, user_id, cancel),
        )
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
    pub ExternalLoginStore {}

    #[async_trait]
    impl EntityStore for ExternalLoginStore {
        type Entity = ExternalLogin;

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
        ) -> AppResult<Option<ExternalLogin>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: ExternalLogin,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ExternalLogin>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<ExternalLogin>;
    }

    #[async_trait]
    impl ExternalLoginStore for ExternalLoginStore {
        async fn get_by_provider_key(
            &self,
            ctx: &ExecutionContext,
            provider: &str,
            provider_key: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<ExternalLogin>>;

        async fn get_by_user_id(
            &self,
            ctx: &ExecutionContext,
            user_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<ExternalLogin>>;

        async fn delete(
            &self,
            ctx: &ExecutionContext,
            id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use mockall::predicate::{always, eq};

    use super::*;
    use crate::testing::{capture_logs, store_failure, test_context, test_tenant_id, token};

    fn create_test_login(user_id: Uuid, provider: &str) -> ExternalLogin {
        let now = Utc::now();
        ExternalLogin {
            id: Uuid::new_v4(),
            tenant_id: test_tenant_id(),
            user_id,
            provider: provider.to_string(),
            provider_key: "108234523478".to_string(),
            display_name: Some("Jane".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_get_by_provider_key_forwards_both_keys() {
        let expected = create_test_login(Uuid::new_v4(), "google");
        let stored = expected.clone();

        let mut store = MockExternalLoginStore::new();
        store
            .expect_get_by_provider_key()
            .with(always(), eq("google"), eq("108234523478"), always())
            .times(1)
            .returning(move |_, _, _, _| Ok(Some(stored.clone())));

        let repo = ExternalLoginRepository::new(Arc::new(store));
        let login = repo
            .get_by_provider_key(&test_context(), "google", "108234523478", &token())
            .await;

        assert_eq!(login, Some(expected));
    }

    #[tokio::test]
    async fn test_get_by_provider_key_returns_none_on_failure() {
        let (logs, _guard) = capture_logs();

        let mut store = MockExternalLoginStore::new();
        store
            .expect_get_by_provider_key()
            .returning(|_, _, _, _| Err(store_failure()));

        let repo = ExternalLoginRepository::new(Arc::new(store));
        let login = repo
            .get_by_provider_key(&test_context(), "github", "octocat", &token())
            .await;

        assert!(login.is_none());
        assert_eq!(logs.error_count(), 1);
    }

    #[tokio::test]
    async fn test_get_by_user_id_returns_linked_logins() {
        let user_id = Uuid::new_v4();

        let mut store = MockExternalLoginStore::new();
        store
            .expect_get_by_user_id()
            .with(always(), eq(user_id), always())
            .returning(|_, user_id, _| {
                Ok(vec![
                    create_test_login(user_id, "google"),
                    create_test_login(user_id, "apple"),
                ])
            });

        let repo = ExternalLoginRepository::new(Arc::new(store));
        let logins = repo.get_by_user_id(&test_context(), user_id, &token()).await;

        let providers: Vec<&str> = logins.iter().map(|l| l.provider.as_str()).collect();
        assert_eq!(providers, vec!["google", "apple"]);
    }

    #[tokio::test]
    async fn test_delete_returns_store_outcome() {
        let mut store = MockExternalLoginStore::new();
        store.expect_delete().times(1).returning(|_, _, _| Ok(false));

        let repo = ExternalLoginRepository::new(Arc::new(store));

        assert!(!repo.delete(&test_context(), Uuid::new_v4(), &token()).await);
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
            let sample = create_test_login(Uuid::new_v4(), "github");
            let ctx = test_context();
            let cancel = token();
            let id = Uuid::new_v4();
            let now = Utc::now();
            let page = PageRequest::default();

            let mut store = MockExternalLoginStore::new();
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
                .expect_get_by_provider_key()
                .times(1)
                .returning(move |_, _, _, _| Ok(Some(item.clone())));
            let item = sample.clone();
            store
                .expect_get_by_user_id()
                .times(1)
                .returning(move |_, _, _| Ok(vec![item.clone()]));
            store
                .expect_delete()
                .times(1)
                .returning(|_, _, _| Ok(true));
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

            let repo = ExternalLoginRepository::new(Arc::new(store));
            assert!(repo.exists(&ctx, id, &cancel).await);
            let found = repo.get_by_id(&ctx, id, &cancel).await;
            assert_eq!(found, Some(sample.clone()));
            assert!(repo.register(&ctx, sample.clone(), &cancel).await);
            let found = repo
                .get_by_provider_key(&ctx, "sample", "sample", &cancel)
                .await;
            assert_eq!(found, Some(sample.clone()));
            let listed = repo.get_by_user_id(&ctx, id, &cancel).await;
            assert_eq!(listed, vec![sample.clone()]);
            assert!(repo.delete(&ctx, id, &cancel).await);

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
            let sample = create_test_login(Uuid::new_v4(), "github");
            let ctx = test_context();
            let cancel = token();
            let id = Uuid::new_v4();
            let now = Utc::now();
            let page = PageRequest::default();

            let mut store = MockExternalLoginStore::new();
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
                .expect_get_by_provider_key()
                .times(1)
                .returning(|_, _, _, _| Err(store_failure()));
            store
                .expect_get_by_user_id()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_delete()
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

            let repo = ExternalLoginRepository::new(Arc::new(store));
            assert!(!repo.exists(&ctx, id, &cancel).await);
            assert!(repo.get_by_id(&ctx, id, &cancel).await.is_none());
            assert!(!repo.register(&ctx, sample.clone(), &cancel).await);
            let found = repo
                .get_by_provider_key(&ctx, "sample", "sample", &cancel)
                .await;
            assert!(found.is_none());
            assert!(repo.get_by_user_id(&ctx, id, &cancel).await.is_empty());
            assert!(!repo.delete(&ctx, id, &cancel).await);
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
                    "get_by_provider_key",
                    "get_by_user_id",
                    "delete",
                ]
            );
            assert!(logs
                .errors()
                .iter()
                .all(|e| e.field("repository") == Some("ExternalLoginRepository")));
        }
    }
}
