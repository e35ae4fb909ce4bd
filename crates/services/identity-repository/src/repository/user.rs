//! User repository.
//!
//! Email and username lookups are case-insensitive in the store; callers
//! pass the value as entered.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use common::AppResult;
use domain::{ExecutionContext, User};

use super::safe::{EntityStore, RepositoryLabel, SafeRepository};

/// User data-access contract.
#[async_trait]
pub trait UserStore: EntityStore<Entity = User> {
    /// Find user by email
    async fn get_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<User>>;

    /// Find user by username
    async fn get_by_username(
        &self,
        ctx: &ExecutionContext,
        username: &str,
        cancel: &CancellationToken,
    ) -> AppResult<Option<User>>;

    async fn exists_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    async fn exists_by_username(
        &self,
        ctx: &ExecutionContext,
        username: &str,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Users directly assigned to a role
    async fn get_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<User>>;

    async fn update(
        &self,
        ctx: &ExecutionContext,
        user: User,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;

    /// Soft delete a user
    async fn delete(
        &self,
        ctx: &ExecutionContext,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> AppResult<bool>;
}

impl RepositoryLabel for dyn UserStore {
    const NAME: &'static str = "UserRepository";
}

pub type UserRepository = SafeRepository<dyn UserStore>;

impl UserRepository {
    pub async fn get_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
        cancel: &CancellationToken,
    ) -> Option<User> {
        self.guard(
            ctx,
            "get_by_email",
            self.inner.get_by_email(ctx, email, cancel),
        )
        .await
    }

    pub async fn get_by_username(
        &self,
        ctx: &ExecutionContext,
        username: &str,
        cancel: &CancellationToken,
    ) -> Option<User> {
        self.guard(
            ctx,
            "get_by_username",
            self.inner.get_by_username(ctx, username, cancel),
        )
        .await
    }

    pub async fn exists_by_email(
        &self,
        ctx: &ExecutionContext,
        email: &str,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_by_email",
            self.inner.exists_by_email(ctx, email, cancel),
        )
        .await
    }

    pub async fn exists_by_username(
        &self,
        ctx: &ExecutionContext,
        username: &str,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(
            ctx,
            "exists_by_username",
            self.inner.exists_by_username(ctx, username, cancel),
        )
        .await
    }

    pub async fn get_by_role_id(
        &self,
        ctx: &ExecutionContext,
        role_id: Uuid,
        cancel: &CancellationToken,
    ) -> Vec<User> {
        self.guard(
            ctx,
            "get_by_role_id",
            self.inner.get_by_role_id(ctx, role_id, cancel),
        )
        .await
    }

    pub async fn update(
        &self,
        ctx: &ExecutionContext,
        user: User,
        cancel: &CancellationToken,
    ) -> bool {
        self.guard(ctx, "update", self.inner.update(ctx, user, cancel))
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
    pub UserStore {}

    #[async_trait]
    impl EntityStore for UserStore {
        type Entity = User;

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
        ) -> AppResult<Option<User>>;

        async fn register(
            &self,
            ctx: &ExecutionContext,
            entity: User,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        fn enumerate_all(
            &self,
            ctx: &ExecutionContext,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<User>;

        fn enumerate_modified_since(
            &self,
            ctx: &ExecutionContext,
            since: chrono::DateTime<chrono::Utc>,
            page: domain::PageRequest,
            cancel: &CancellationToken,
        ) -> super::EntityStream<User>;
    }

    #[async_trait]
    impl UserStore for UserStore {
        async fn get_by_email(
            &self,
            ctx: &ExecutionContext,
            email: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<User>>;

        async fn get_by_username(
            &self,
            ctx: &ExecutionContext,
            username: &str,
            cancel: &CancellationToken,
        ) -> AppResult<Option<User>>;

        async fn exists_by_email(
            &self,
            ctx: &ExecutionContext,
            email: &str,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn exists_by_username(
            &self,
            ctx: &ExecutionContext,
            username: &str,
            cancel: &CancellationToken,
        ) -> AppResult<bool>;

        async fn get_by_role_id(
            &self,
            ctx: &ExecutionContext,
            role_id: Uuid,
            cancel: &CancellationToken,
        ) -> AppResult<Vec<User>>;

        async fn update(
            &self,
            ctx: &ExecutionContext,
            user: User,
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

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockall::predicate::{always, eq};

    use super::*;
    use crate::testing::{capture_logs, store_failure, test_context, test_tenant_id, token};

    fn create_test_user(email: &str, username: &str) -> User {
        User::new(
            test_tenant_id(),
            email.to_string(),
            username.to_string(),
            "hashed_password".to_string(),
            "Jane Doe".to_string(),
        )
    }

    #[tokio::test]
    async fn test_get_by_email_returns_user() {
        let expected = create_test_user("jane@example.com", "jane");
        let stored = expected.clone();

        let mut store = MockUserStore::new();
        store
            .expect_get_by_email()
            .with(always(), eq("jane@example.com"), always())
            .times(1)
            .returning(move |_, _, _| Ok(Some(stored.clone())));

        let repo = UserRepository::new(Arc::new(store));
        let user = repo
            .get_by_email(&test_context(), "jane@example.com", &token())
            .await;

        assert_eq!(user, Some(expected));
    }

    #[tokio::test]
    async fn test_get_by_username_returns_none_when_missing() {
        let mut store = MockUserStore::new();
        store
            .expect_get_by_username()
            .returning(|_, _, _| Ok(None));

        let repo = UserRepository::new(Arc::new(store));

        assert!(repo.get_by_username(&test_context(), "ghost", &token()).await.is_none());
    }

    #[tokio::test]
    async fn test_exists_by_email_returns_false_on_failure() {
        let (logs, _guard) = capture_logs();
        let ctx = test_context();

        let mut store = MockUserStore::new();
        store
            .expect_exists_by_email()
            .times(1)
            .returning(|_, _, _| Err(store_failure()));

        let repo = UserRepository::new(Arc::new(store));

        assert!(!repo.exists_by_email(&ctx, "jane@example.com", &token()).await);

        let errors = logs.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field("repository"), Some("UserRepository"));
        assert_eq!(
            errors[0].field("correlation_id"),
            Some(ctx.correlation_id.to_string().as_str())
        );
    }

    #[tokio::test]
    async fn test_exists_by_username() {
        let mut store = MockUserStore::new();
        store
            .expect_exists_by_username()
            .with(always(), eq("jane"), always())
            .returning(|_, _, _| Ok(true));

        let repo = UserRepository::new(Arc::new(store));

        assert!(repo.exists_by_username(&test_context(), "jane", &token()).await);
    }

    #[tokio::test]
    async fn test_get_by_role_id_returns_empty_on_failure() {
        let (logs, _guard) = capture_logs();

        let mut store = MockUserStore::new();
        store
            .expect_get_by_role_id()
            .returning(|_, _, _| Err(store_failure()));

        let repo = UserRepository::new(Arc::new(store));

        assert!(repo.get_by_role_id(&test_context(), Uuid::new_v4(), &token()).await.is_empty());
        assert_eq!(logs.error_count(), 1);
    }

    #[tokio::test]
    async fn test_update_passes_modified_user() {
        let mut user = create_test_user("jane@example.com", "jane");
        user.lock();
        let expected = user.clone();

        let mut store = MockUserStore::new();
        store
            .expect_update()
            .with(always(), eq(expected), always())
            .times(1)
            .returning(|_, _, _| Ok(true));

        let repo = UserRepository::new(Arc::new(store));

        assert!(repo.update(&test_context(), user, &token()).await);
    }

    #[tokio::test]
    async fn test_delete_returns_false_on_failure() {
        let (logs, _guard) = capture_logs();

        let mut store = MockUserStore::new();
        store
            .expect_delete()
            .times(1)
            .returning(|_, _, _| Err(store_failure()));

        let repo = UserRepository::new(Arc::new(store));

        assert!(!repo.delete(&test_context(), Uuid::new_v4(), &token()).await);
        assert_eq!(logs.error_count(), 1);
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
            let sample = create_test_user("jane@example.com", "jane");
            let ctx = test_context();
            let cancel = token();
            let id = Uuid::new_v4();
            let now = Utc::now();
            let page = PageRequest::default();

            let mut store = MockUserStore::new();
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
                .expect_get_by_email()
                .times(1)
                .returning(move |_, _, _| Ok(Some(item.clone())));
            let item = sample.clone();
            store
                .expect_get_by_username()
                .times(1)
                .returning(move |_, _, _| Ok(Some(item.clone())));
            store
                .expect_exists_by_email()
                .times(1)
                .returning(|_, _, _| Ok(true));
            store
                .expect_exists_by_username()
                .times(1)
                .returning(|_, _, _| Ok(true));
            let item = sample.clone();
            store
                .expect_get_by_role_id()
                .times(1)
                .returning(move |_, _, _| Ok(vec![item.clone()]));
            store
                .expect_update()
                .times(1)
                .returning(|_, _, _| Ok(true));
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

            let repo = UserRepository::new(Arc::new(store));
            assert!(repo.exists(&ctx, id, &cancel).await);
            let found = repo.get_by_id(&ctx, id, &cancel).await;
            assert_eq!(found, Some(sample.clone()));
            assert!(repo.register(&ctx, sample.clone(), &cancel).await);
            let found = repo.get_by_email(&ctx, "sample", &cancel).await;
            assert_eq!(found, Some(sample.clone()));
            let found = repo.get_by_username(&ctx, "sample", &cancel).await;
            assert_eq!(found, Some(sample.clone()));
            assert!(repo.exists_by_email(&ctx, "sample", &cancel).await);
            assert!(repo.exists_by_username(&ctx, "sample", &cancel).await);
            let listed = repo.get_by_role_id(&ctx, id, &cancel).await;
            assert_eq!(listed, vec![sample.clone()]);
            assert!(repo.update(&ctx, sample.clone(), &cancel).await);
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
            let sample = create_test_user("jane@example.com", "jane");
            let ctx = test_context();
            let cancel = token();
            let id = Uuid::new_v4();
            let now = Utc::now();
            let page = PageRequest::default();

            let mut store = MockUserStore::new();
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
                .expect_get_by_email()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_get_by_username()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_exists_by_email()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_exists_by_username()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_get_by_role_id()
                .times(1)
                .returning(|_, _, _| Err(store_failure()));
            store
                .expect_update()
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

            let repo = UserRepository::new(Arc::new(store));
            assert!(!repo.exists(&ctx, id, &cancel).await);
            assert!(repo.get_by_id(&ctx, id, &cancel).await.is_none());
            assert!(!repo.register(&ctx, sample.clone(), &cancel).await);
            assert!(repo.get_by_email(&ctx, "sample", &cancel).await.is_none());
            let found = repo.get_by_username(&ctx, "sample", &cancel).await;
            assert!(found.is_none());
            assert!(!repo.exists_by_email(&ctx, "sample", &cancel).await);
            assert!(!repo.exists_by_username(&ctx, "sample", &cancel).await);
            assert!(repo.get_by_role_id(&ctx, id, &cancel).await.is_empty());
            assert!(!repo.update(&ctx, sample.clone(), &cancel).await);
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
                    "get_by_email",
                    "get_by_username",
                    "exists_by_email",
                    "exists_by_username",
                    "get_by_role_id",
                    "update",
                    "delete",
                ]
            );
            assert!(logs
                .errors()
                .iter()
                .all(|e| e.field("repository") == Some("UserRepository")));
        }
    }
}
