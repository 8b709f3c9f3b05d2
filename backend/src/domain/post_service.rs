//! Post domain service.
//!
//! Implements [`PostsQuery`] and [`PostsCommand`] over a [`PostRepository`],
//! applying the ownership rule before every update and delete.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageInfo, Paginated};

use crate::domain::ports::{
    DeletePostRequest, PostRepository, PostRepositoryError, PostsCommand, PostsQuery,
    UpdatePostRequest,
};
use crate::domain::{
    AccessDenied, Error, NO_TOKEN, NewPost, Post, PostId, PostListQuery, UserId,
    authorize_mutation,
};

/// Message returned for unknown post ids.
pub const POST_NOT_FOUND: &str = "Post not found";

/// Verb used in the forbidden message for each mutation.
#[derive(Debug, Clone, Copy)]
enum Mutation {
    Update,
    Delete,
}

impl Mutation {
    fn verb(self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Post service implementing the post driving ports.
#[derive(Clone)]
pub struct PostService<P> {
    posts: Arc<P>,
}

impl<P> PostService<P> {
    /// Create a new service over `posts`.
    pub fn new(posts: Arc<P>) -> Self {
        Self { posts }
    }
}

impl<P> PostService<P>
where
    P: PostRepository,
{
    fn map_post_error(error: PostRepositoryError) -> Error {
        match error {
            PostRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("post repository unavailable: {message}"))
            }
            PostRepositoryError::Query { message } => {
                Error::internal(format!("post repository error: {message}"))
            }
            PostRepositoryError::UnknownAuthor { .. } => {
                Error::not_found(super::account_service::USER_NOT_FOUND)
            }
        }
    }

    fn map_denial(denied: AccessDenied, mutation: Mutation) -> Error {
        match denied {
            AccessDenied::NotFound => Error::not_found(POST_NOT_FOUND),
            AccessDenied::Unauthenticated => Error::unauthorized(NO_TOKEN),
            AccessDenied::Forbidden => Error::forbidden(format!(
                "You do not have permission to {} this post",
                mutation.verb()
            )),
        }
    }

    async fn find(&self, id: PostId) -> Result<Option<Post>, Error> {
        self.posts
            .find_by_id(id)
            .await
            .map_err(Self::map_post_error)
    }

    async fn authorize(
        &self,
        id: PostId,
        actor: Option<UserId>,
        mutation: Mutation,
    ) -> Result<(), Error> {
        let existing = self.find(id).await?;
        authorize_mutation(actor, existing.as_ref())
            .map(|_| ())
            .map_err(|denied| Self::map_denial(denied, mutation))
    }
}

#[async_trait]
impl<P> PostsQuery for PostService<P>
where
    P: PostRepository,
{
    async fn list(&self, query: PostListQuery) -> Result<Paginated<Post>, Error> {
        let slice = self
            .posts
            .list(&query)
            .await
            .map_err(Self::map_post_error)?;
        Ok(Paginated::new(
            slice.posts,
            PageInfo::new(query.page, slice.total),
        ))
    }

    async fn get(&self, id: PostId) -> Result<Post, Error> {
        self.find(id)
            .await?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
    }
}

#[async_trait]
impl<P> PostsCommand for PostService<P>
where
    P: PostRepository,
{
    async fn create(&self, post: NewPost) -> Result<Post, Error> {
        self.posts
            .create(&post)
            .await
            .map_err(Self::map_post_error)
    }

    async fn update(&self, request: UpdatePostRequest) -> Result<Post, Error> {
        self.authorize(request.post_id, request.actor, Mutation::Update)
            .await?;

        self.posts
            .update(request.post_id, &request.changes)
            .await
            .map_err(Self::map_post_error)?
            .ok_or_else(|| Error::not_found(POST_NOT_FOUND))
    }

    async fn delete(&self, request: DeletePostRequest) -> Result<(), Error> {
        self.authorize(request.post_id, request.actor, Mutation::Delete)
            .await?;

        let removed = self
            .posts
            .delete(request.post_id)
            .await
            .map_err(Self::map_post_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(POST_NOT_FOUND))
        }
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
