//! Driving port for post mutations.
//!
//! Update and delete carry the caller's identity so the service can apply the
//! ownership rule after loading the post.

use async_trait::async_trait;

use crate::domain::{Error, NewPost, Post, PostChanges, PostId, UserId};

/// Request to change an existing post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePostRequest {
    pub post_id: PostId,
    /// Authenticated caller, if any.
    pub actor: Option<UserId>,
    pub changes: PostChanges,
}

/// Request to remove an existing post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletePostRequest {
    pub post_id: PostId,
    /// Authenticated caller, if any.
    pub actor: Option<UserId>,
}

/// Domain use-case port for creating, changing and deleting posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Store a new post owned by `post.author_id`.
    async fn create(&self, post: NewPost) -> Result<Post, Error>;

    /// Apply partial changes if the caller owns the post.
    async fn update(&self, request: UpdatePostRequest) -> Result<Post, Error>;

    /// Remove the post if the caller owns it.
    async fn delete(&self, request: DeletePostRequest) -> Result<(), Error>;
}
