//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, EmailAddress, UserName: account identity.
//! - Registration, LoginCredentials, AuthContext, Session: authentication.
//! - Post, PostId, PostStatus, NewPost, PostChanges, PostListQuery: posts.
//! - authorize_mutation / Owned: the ownership rule.
//! - AccountService, PostService: driving port implementations.

pub mod account_service;
pub mod auth;
pub mod error;
pub mod ownership;
pub mod ports;
pub mod post;
pub mod post_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::auth::{
    AuthContext, IssuedToken, LoginCredentials, NO_TOKEN, Registration, Session,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ownership::{AccessDenied, Owned, authorize_mutation};
pub use self::post::{
    AuthorSummary, NewPost, Post, PostChanges, PostContent, PostDraft, PostId, PostListQuery,
    PostParts, PostStatus, PostTitle, PostValidationError,
};
pub use self::post_service::PostService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, NewUser, PasswordHash, ProfileChanges, User, UserCredentials, UserId, UserName,
    UserValidationError,
};
pub use self::validation::{FieldErrors, VALIDATION_FAILED};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use pressroom::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
