//! OpenAPI schema definitions for domain types and response envelopes.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON produced by their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

#![expect(
    dead_code,
    reason = "Types exist only for OpenAPI schema generation via utoipa"
)]

use utoipa::ToSchema;

/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request clashes with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Registered account as returned to clients. The password hash is never
/// included.
#[derive(ToSchema)]
#[schema(as = User, rename_all = "camelCase")]
pub struct UserSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
}

/// Author fields embedded in every post.
#[derive(ToSchema)]
#[schema(as = Author)]
pub struct AuthorSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
}

/// Publication state of a post.
#[derive(ToSchema)]
#[schema(as = PostStatus)]
pub enum PostStatusSchema {
    #[schema(rename = "draft")]
    Draft,
    #[schema(rename = "published")]
    Published,
}

/// Blog post with its author.
#[derive(ToSchema)]
#[schema(as = Post, rename_all = "camelCase")]
pub struct PostSchema {
    #[schema(example = 12)]
    id: i64,
    #[schema(example = "Borrowing without tears")]
    title: String,
    content: String,
    excerpt: Option<String>,
    status: PostStatusSchema,
    author_id: i64,
    author: AuthorSchema,
    #[schema(value_type = String, format = DateTime)]
    created_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// Result-set summary for the post listing.
#[derive(ToSchema)]
#[schema(as = Pagination)]
pub struct PaginationSchema {
    #[schema(example = 25)]
    total: u64,
    #[schema(example = 1)]
    page: u32,
    #[schema(example = 10)]
    limit: u32,
    #[schema(example = 3)]
    pages: u64,
}

/// Account plus bearer token issued at registration or login.
#[derive(ToSchema)]
#[schema(as = SessionData)]
pub struct SessionDataSchema {
    user: UserSchema,
    token: String,
}

/// `{"success": true, "message": ..., "data": {"user", "token"}}`.
#[derive(ToSchema)]
#[schema(as = SessionResponse)]
pub struct SessionResponseSchema {
    success: bool,
    message: String,
    data: SessionDataSchema,
}

/// Wrapper around a single user.
#[derive(ToSchema)]
#[schema(as = UserData)]
pub struct UserDataSchema {
    user: UserSchema,
}

/// `{"success": true, "data": {"user"}}`.
#[derive(ToSchema)]
#[schema(as = UserResponse)]
pub struct UserResponseSchema {
    success: bool,
    message: Option<String>,
    data: UserDataSchema,
}

/// `{"success": true, "data": post}`.
#[derive(ToSchema)]
#[schema(as = PostResponse)]
pub struct PostResponseSchema {
    success: bool,
    message: Option<String>,
    data: PostSchema,
}

/// One page of posts.
#[derive(ToSchema)]
#[schema(as = PostPage)]
pub struct PostPageSchema {
    posts: Vec<PostSchema>,
    pagination: PaginationSchema,
}

/// `{"success": true, "data": {"posts", "pagination"}}`.
#[derive(ToSchema)]
#[schema(as = PostListResponse)]
pub struct PostListResponseSchema {
    success: bool,
    data: PostPageSchema,
}

/// `{"success": true, "message": ...}`.
#[derive(ToSchema)]
#[schema(as = MessageResponse)]
pub struct MessageResponseSchema {
    success: bool,
    #[schema(example = "Post deleted successfully")]
    message: String,
}

/// Body of `GET /health`.
#[derive(ToSchema)]
#[schema(as = HealthStatus)]
pub struct HealthStatusSchema {
    success: bool,
    #[schema(example = "Server is running")]
    message: String,
    #[schema(value_type = String, format = DateTime)]
    timestamp: String,
}
