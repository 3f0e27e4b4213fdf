use crate::entities::{Post, PostId};
use crate::errors::{self as errors, PostsServiceError};
use crate::posts_store::PostsStore;
use async_trait::async_trait;
use core_transpose::{ColumnTable, transpose_entities};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, ensure};
use std::sync::Arc;

pub type PostsServiceResult<T> = Result<T, PostsServiceError>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostCreatePayload {
    pub title: String,
    pub content: String,
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PostUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl PostUpdatePayload {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

#[async_trait]
pub trait PostsService: Send + Sync {
    /// Stores a new post and returns its assigned id.
    async fn create(&self, payload: PostCreatePayload) -> PostsServiceResult<PostId>;
    /// Applies the present payload fields to an existing post.
    async fn update(&self, id: PostId, payload: PostUpdatePayload) -> PostsServiceResult<PostId>;
    async fn find_by_id(&self, id: PostId) -> PostsServiceResult<Post>;
    async fn delete(&self, id: PostId) -> PostsServiceResult<()>;
    /// All posts, newest first. Never fails on an empty store.
    async fn find_all_desc(&self) -> PostsServiceResult<Vec<Post>>;
    /// The post list in columnar form, one column per projected field.
    async fn find_all_columnar(&self) -> PostsServiceResult<ColumnTable>;
}

pub struct CorePostsService {
    store: Arc<dyn PostsStore>,
}

impl CorePostsService {
    pub fn new(store: Arc<dyn PostsStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PostsService for CorePostsService {
    #[tracing::instrument(name = "posts::create", level = "debug", skip(self), err)]
    async fn create(&self, payload: PostCreatePayload) -> PostsServiceResult<PostId> {
        let post = Post::new(payload.title, payload.content, payload.author);
        let post = self
            .store
            .add_post(post)
            .await
            .context(errors::CreateSnafu)?;
        Ok(post.id)
    }

    #[tracing::instrument(name = "posts::update", level = "debug", skip(self), err)]
    async fn update(&self, id: PostId, payload: PostUpdatePayload) -> PostsServiceResult<PostId> {
        ensure!(!payload.is_empty(), errors::NothingToUpdateSnafu);

        let mut post = self
            .store
            .get_post(id)
            .await
            .context(errors::UpdateSnafu)?;
        if let Some(title) = payload.title {
            post.set_title(title);
        }
        if let Some(content) = payload.content {
            post.set_content(content);
        }
        self.store
            .update_post(post)
            .await
            .context(errors::UpdateSnafu)?;
        Ok(id)
    }

    #[tracing::instrument(name = "posts::find_by_id", level = "debug", skip(self), err)]
    async fn find_by_id(&self, id: PostId) -> PostsServiceResult<Post> {
        self.store.get_post(id).await.context(errors::GetSnafu)
    }

    #[tracing::instrument(name = "posts::delete", level = "debug", skip(self), err)]
    async fn delete(&self, id: PostId) -> PostsServiceResult<()> {
        self.store.delete_post(id).await.context(errors::DeleteSnafu)
    }

    #[tracing::instrument(name = "posts::find_all_desc", level = "debug", skip(self), err)]
    async fn find_all_desc(&self) -> PostsServiceResult<Vec<Post>> {
        self.store.get_posts().await.context(errors::ListSnafu)
    }

    #[tracing::instrument(name = "posts::find_all_columnar", level = "debug", skip(self), err)]
    async fn find_all_columnar(&self) -> PostsServiceResult<ColumnTable> {
        let posts = self.store.get_posts().await.context(errors::ListSnafu)?;
        Ok(transpose_entities(&posts))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::{CorePostsService, PostCreatePayload, PostUpdatePayload, PostsService};
    use crate::entities::Post;
    use crate::errors::{PostsServiceError, PostsStoreError};
    use crate::posts_store::{MemoryPostsStore, MockPostsStore};
    use serde_json::json;
    use std::sync::Arc;

    fn create_payload(title: &str) -> PostCreatePayload {
        PostCreatePayload {
            title: title.to_string(),
            content: format!("{title} content"),
            author: "author".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_returns_store_assigned_id() {
        let mut store = MockPostsStore::new();
        store.expect_add_post().returning(|mut post| {
            post.id = 10;
            Ok(post)
        });

        let service = CorePostsService::new(Arc::new(store));
        let id = service
            .create(create_payload("A"))
            .await
            .expect("Failed creating post");
        assert_eq!(id, 10);
    }

    #[tokio::test]
    async fn test_update_applies_only_present_fields() {
        let mut store = MockPostsStore::new();
        store.expect_get_post().returning(|id| {
            let mut post = Post::new(
                "old title".to_string(),
                "old content".to_string(),
                "author".to_string(),
            );
            post.id = id;
            Ok(post)
        });
        store
            .expect_update_post()
            .withf(|post| post.title == "new title" && post.content == "old content")
            .returning(|_| Ok(()));

        let service = CorePostsService::new(Arc::new(store));
        let id = service
            .update(
                5,
                PostUpdatePayload {
                    title: Some("new title".to_string()),
                    content: None,
                },
            )
            .await
            .expect("Failed updating post");
        assert_eq!(id, 5);
    }

    #[tokio::test]
    async fn test_update_with_empty_payload_touches_nothing() {
        // No expectations: any store call would fail the test.
        let store = MockPostsStore::new();
        let service = CorePostsService::new(Arc::new(store));

        let result = service
            .update(
                1,
                PostUpdatePayload {
                    title: None,
                    content: None,
                },
            )
            .await;
        assert!(matches!(result, Err(PostsServiceError::NothingToUpdate)));
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let mut store = MockPostsStore::new();
        store
            .expect_get_post()
            .returning(|id| Err(PostsStoreError::PostNotFound { id }));

        let service = CorePostsService::new(Arc::new(store));
        let error = service
            .update(
                9,
                PostUpdatePayload {
                    title: Some("x".to_string()),
                    content: None,
                },
            )
            .await
            .expect_err("Update of a missing post must fail");
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_find_by_id_missing_post_is_not_found() {
        let mut store = MockPostsStore::new();
        store
            .expect_get_post()
            .returning(|id| Err(PostsStoreError::PostNotFound { id }));

        let service = CorePostsService::new(Arc::new(store));
        let error = service
            .find_by_id(3)
            .await
            .expect_err("Get of a missing post must fail");
        assert!(matches!(
            error,
            PostsServiceError::Get {
                source: PostsStoreError::PostNotFound { id: 3 }
            }
        ));
    }

    #[tokio::test]
    async fn test_crud_flow_over_memory_store() {
        let service = CorePostsService::new(Arc::new(MemoryPostsStore::new()));

        let first = service
            .create(create_payload("first"))
            .await
            .expect("Failed creating post");
        let second = service
            .create(create_payload("second"))
            .await
            .expect("Failed creating post");

        service
            .update(
                first,
                PostUpdatePayload {
                    title: None,
                    content: Some("rewritten".to_string()),
                },
            )
            .await
            .expect("Failed updating post");

        let fetched = service
            .find_by_id(first)
            .await
            .expect("Failed getting post");
        assert_eq!(fetched.title, "first");
        assert_eq!(fetched.content, "rewritten");

        let items = service.find_all_desc().await.expect("Failed listing posts");
        assert_eq!(
            items.iter().map(|post| post.id).collect::<Vec<_>>(),
            vec![second, first]
        );

        service.delete(second).await.expect("Failed deleting post");
        let error = service
            .find_by_id(second)
            .await
            .expect_err("Deleted post must be gone");
        assert!(error.is_not_found());
    }

    #[tokio::test]
    async fn test_find_all_columnar_projects_newest_first() {
        let service = CorePostsService::new(Arc::new(MemoryPostsStore::new()));
        let first = service
            .create(create_payload("first"))
            .await
            .expect("Failed creating post");
        let second = service
            .create(create_payload("second"))
            .await
            .expect("Failed creating post");

        let table = service
            .find_all_columnar()
            .await
            .expect("Failed building columnar posts");
        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            vec!["id", "title", "content", "author"]
        );
        assert_eq!(table["id"], vec![json!(second), json!(first)]);
        assert_eq!(table["title"], vec![json!("second"), json!("first")]);
    }

    #[tokio::test]
    async fn test_find_all_columnar_on_empty_store() {
        let service = CorePostsService::new(Arc::new(MemoryPostsStore::new()));
        let table = service
            .find_all_columnar()
            .await
            .expect("Failed building columnar posts");
        assert!(table.is_empty());
    }
}
