use crate::entities::{Post, PostId};
use crate::errors::PostsStoreError;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

pub type PostsStoreResult<T> = Result<T, PostsStoreError>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsStore: std::fmt::Debug + Send + Sync {
    /// Assigns the next id and stores the post.
    async fn add_post(&self, post: Post) -> PostsStoreResult<Post>;
    async fn get_post(&self, id: PostId) -> PostsStoreResult<Post>;
    async fn update_post(&self, post: Post) -> PostsStoreResult<()>;
    async fn delete_post(&self, id: PostId) -> PostsStoreResult<()>;
    /// All posts, newest id first. Never fails on an empty store.
    async fn get_posts(&self) -> PostsStoreResult<Vec<Post>>;
}

#[derive(Debug, Default)]
pub struct MemoryPostsStore {
    posts: DashMap<PostId, Post>,
    next_id: AtomicI64,
}

impl MemoryPostsStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostsStore for MemoryPostsStore {
    async fn add_post(&self, mut post: Post) -> PostsStoreResult<Post> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        post.id = id;
        self.posts.insert(id, post.clone());
        Ok(post)
    }

    async fn get_post(&self, id: PostId) -> PostsStoreResult<Post> {
        self.posts
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or(PostsStoreError::PostNotFound { id })
    }

    async fn update_post(&self, mut post: Post) -> PostsStoreResult<()> {
        post.set_updated_at(None);
        self.posts.insert(post.id, post);
        Ok(())
    }

    async fn delete_post(&self, id: PostId) -> PostsStoreResult<()> {
        // raise an error if we can't locate
        self.get_post(id).await?;
        self.posts.remove(&id);
        Ok(())
    }

    async fn get_posts(&self) -> PostsStoreResult<Vec<Post>> {
        let mut items: Vec<Post> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by_key(|post| std::cmp::Reverse(post.id));
        Ok(items)
    }
}
