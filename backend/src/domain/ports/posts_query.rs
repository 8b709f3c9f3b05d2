//! Driving port for the public post reads.
//!
//! Reads never consult the ownership rule; drafts are visible to everyone.

use async_trait::async_trait;
use pagination::Paginated;

use crate::domain::{Error, Post, PostId, PostListQuery};

/// Domain use-case port for listing and fetching posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// One page of posts matching `query`.
    async fn list(&self, query: PostListQuery) -> Result<Paginated<Post>, Error>;

    /// A single post, or `not_found`.
    async fn get(&self, id: PostId) -> Result<Post, Error>;
}
