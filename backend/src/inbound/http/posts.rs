//! Post HTTP handlers.
//!
//! ```text
//! GET    /api/posts?page=1&limit=10&search=rust&status=published
//! GET    /api/posts/{id}
//! POST   /api/posts        {"title":"Hello","content":"Long enough body"}
//! PUT    /api/posts/{id}   {"status":"published"}
//! DELETE /api/posts/{id}
//! ```
//!
//! Reads are public. Mutations require a bearer token; update and delete
//! additionally require the caller to own the post.

use actix_web::{HttpResponse, delete, get, post, put, web};
use pagination::PageInfo;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{DeletePostRequest, UpdatePostRequest};
use crate::domain::{Error, NewPost, Post, PostChanges, PostDraft, PostId, PostListQuery};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::ApiResponse;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::schemas::{
    MessageResponseSchema, PostListResponseSchema, PostResponseSchema,
};
use crate::inbound::http::state::HttpState;

pub const POST_CREATED: &str = "Post created successfully";
pub const POST_UPDATED: &str = "Post updated successfully";
pub const POST_DELETED: &str = "Post deleted successfully";
pub const INVALID_POST_ID: &str = "Invalid post ID";

/// Query string accepted by `GET /api/posts`.
///
/// Values are kept raw; unusable page, limit or status values fall back to
/// their defaults instead of failing the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListPostsParams {
    /// 1-based page number (default 1).
    pub page: Option<String>,
    /// Page size (default 10).
    pub limit: Option<String>,
    /// Case-insensitive match against title, content and excerpt.
    pub search: Option<String>,
    /// `draft` or `published`; anything else is ignored.
    pub status: Option<String>,
}

impl From<ListPostsParams> for PostListQuery {
    fn from(value: ListPostsParams) -> Self {
        Self::from_raw(
            value.page.as_deref(),
            value.limit.as_deref(),
            value.search.as_deref(),
            value.status.as_deref(),
        )
    }
}

/// Body for creating or updating a post.
///
/// On create `title` and `content` are required; on update every member is
/// optional and absent members stay unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct PostRequest {
    #[schema(example = "Borrowing without tears")]
    pub title: Option<String>,
    #[schema(example = "Ownership explained one lifetime at a time.")]
    pub content: Option<String>,
    pub excerpt: Option<String>,
    #[schema(example = "draft")]
    pub status: Option<String>,
}

impl PostRequest {
    fn as_draft(&self) -> PostDraft<'_> {
        PostDraft {
            title: self.title.as_deref(),
            content: self.content.as_deref(),
            excerpt: self.excerpt.as_deref(),
            status: self.status.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PostPage {
    posts: Vec<Post>,
    pagination: PageInfo,
}

fn parse_post_id(raw: &str) -> Result<PostId, Error> {
    raw.parse::<PostId>()
        .map_err(|_| Error::invalid_request(INVALID_POST_ID))
}

/// List posts, newest first.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(ListPostsParams),
    responses(
        (status = 200, description = "One page of posts", body = PostListResponseSchema),
        (status = 503, description = "Store unavailable", body = ErrorEnvelope)
    ),
    tags = ["posts"],
    operation_id = "listPosts",
    security([])
)]
#[get("/posts")]
pub async fn list_posts(
    state: web::Data<HttpState>,
    params: web::Query<ListPostsParams>,
) -> ApiResult<HttpResponse> {
    let page = state.posts.list(params.into_inner().into()).await?;
    let (posts, pagination) = page.into_parts();
    Ok(HttpResponse::Ok().json(ApiResponse::data(PostPage { posts, pagination })))
}

/// Fetch one post by id.
#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "The post", body = PostResponseSchema),
        (status = 400, description = "Invalid post ID", body = ErrorEnvelope),
        (status = 404, description = "Post not found", body = ErrorEnvelope)
    ),
    tags = ["posts"],
    operation_id = "getPost",
    security([])
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_post_id(&path)?;
    let post = state.posts.get(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(post)))
}

/// Create a post owned by the caller. Status defaults to `draft`.
#[utoipa::path(
    post,
    path = "/api/posts",
    request_body = PostRequest,
    responses(
        (status = 201, description = "Post created", body = PostResponseSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope)
    ),
    tags = ["posts"],
    operation_id = "createPost",
    security(("bearer" = []))
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let new_post = NewPost::try_from_draft(payload.as_draft(), caller.user_id())?;
    let post = state.posts_command.create(new_post).await?;
    Ok(HttpResponse::Created().json(ApiResponse::data(post).with_message(POST_CREATED)))
}

/// Change fields of a post the caller owns.
#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    request_body = PostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostResponseSchema),
        (status = 400, description = "Validation failed", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Caller does not own the post", body = ErrorEnvelope),
        (status = 404, description = "Post not found", body = ErrorEnvelope)
    ),
    tags = ["posts"],
    operation_id = "updatePost",
    security(("bearer" = []))
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: web::Json<PostRequest>,
) -> ApiResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    let changes = PostChanges::try_from_draft(payload.as_draft())?;
    let post = state
        .posts_command
        .update(UpdatePostRequest {
            post_id,
            actor: Some(caller.user_id()),
            changes,
        })
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(post).with_message(POST_UPDATED)))
}

/// Remove a post the caller owns.
#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    params(("id" = i64, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponseSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Caller does not own the post", body = ErrorEnvelope),
        (status = 404, description = "Post not found", body = ErrorEnvelope)
    ),
    tags = ["posts"],
    operation_id = "deletePost",
    security(("bearer" = []))
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let post_id = parse_post_id(&path)?;
    state
        .posts_command
        .delete(DeletePostRequest {
            post_id,
            actor: Some(caller.user_id()),
        })
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::message(POST_DELETED)))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
