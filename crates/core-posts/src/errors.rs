use crate::entities::PostId;
use snafu::Snafu;

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum PostsStoreError {
    #[snafu(display("Can't locate post by id: {id}"))]
    PostNotFound { id: PostId },
}

#[derive(Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum PostsServiceError {
    #[snafu(display("Create post error: {source}"))]
    Create { source: PostsStoreError },

    #[snafu(display("Get post error: {source}"))]
    Get { source: PostsStoreError },

    #[snafu(display("Update post error: {source}"))]
    Update { source: PostsStoreError },

    #[snafu(display("Delete post error: {source}"))]
    Delete { source: PostsStoreError },

    #[snafu(display("List posts error: {source}"))]
    List { source: PostsStoreError },

    #[snafu(display("No fields to update"))]
    NothingToUpdate,
}

impl PostsServiceError {
    /// True when the underlying cause is a missing post.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Get {
                source: PostsStoreError::PostNotFound { .. }
            } | Self::Update {
                source: PostsStoreError::PostNotFound { .. }
            } | Self::Delete {
                source: PostsStoreError::PostNotFound { .. }
            }
        )
    }
}
