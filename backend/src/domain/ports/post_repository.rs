//! Port for post persistence and the public listing query.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId, PostListQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by post repository adapters.
    pub enum PostRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
        /// The author referenced by a new post does not exist.
        UnknownAuthor { author_id: i64 } => "post author {author_id} does not exist",
    }
}

/// One page of posts plus the number of posts matching the filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostSlice {
    /// Posts on the requested page, newest first.
    pub posts: Vec<Post>,
    /// Matching posts across all pages.
    pub total: u64,
}

/// Port for reading and writing posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Filter, order by `createdAt` then `id` (both descending) and page.
    async fn list(&self, query: &PostListQuery) -> Result<PostSlice, PostRepositoryError>;

    /// Find a post by id.
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError>;

    /// Insert a post owned by `post.author_id`.
    async fn create(&self, post: &NewPost) -> Result<Post, PostRepositoryError>;

    /// Apply partial changes; `None` when the post does not exist.
    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<Post>, PostRepositoryError>;

    /// Remove a post, returning whether it existed.
    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError>;
}
