//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccessTokens, AccountCommand, PostsCommand, PostsQuery, UserProfileQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// `tokens` is consulted by the bearer-token extractor before any protected
/// handler runs.
#[derive(Clone)]
pub struct HttpState {
    pub accounts: Arc<dyn AccountCommand>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub posts: Arc<dyn PostsQuery>,
    pub posts_command: Arc<dyn PostsCommand>,
    pub tokens: Arc<dyn AccessTokens>,
}
