//! Builders wiring repositories, adapters and domain services into
//! [`HttpState`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use pressroom::domain::ports::{AccessTokens, PostRepository, UserRepository};
use pressroom::domain::{AccountService, PostService};
use pressroom::inbound::http::state::HttpState;
use pressroom::outbound::memory::InMemoryStore;
use pressroom::outbound::persistence::{DbPool, DieselPostRepository, DieselUserRepository};
use pressroom::outbound::security::Argon2PasswordHasher;
use pressroom::outbound::token::{JwtAccessTokens, TokenSettings};
use tracing::warn;

use super::ServerConfig;

fn assemble<U, P>(
    users: Arc<U>,
    posts: Arc<P>,
    tokens: Arc<JwtAccessTokens>,
) -> HttpState
where
    U: UserRepository + 'static,
    P: PostRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        tokens.clone(),
    ));
    let post_service = Arc::new(PostService::new(posts));
    let verifier: Arc<dyn AccessTokens> = tokens;

    HttpState {
        accounts: accounts.clone(),
        profile: accounts,
        posts: post_service.clone(),
        posts_command: post_service,
        tokens: verifier,
    }
}

fn build_db_state(
    pool: &DbPool,
    clock: Arc<dyn Clock>,
    tokens: Arc<JwtAccessTokens>,
) -> HttpState {
    assemble(
        Arc::new(DieselUserRepository::new(pool.clone(), clock.clone())),
        Arc::new(DieselPostRepository::new(pool.clone(), clock)),
        tokens,
    )
}

fn build_memory_state(clock: Arc<dyn Clock>, tokens: Arc<JwtAccessTokens>) -> HttpState {
    warn!("no database configured; using the in-memory store (data is lost on restart)");
    let store = Arc::new(InMemoryStore::new(clock));
    assemble(store.clone(), store, tokens)
}

fn build_tokens(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Arc<JwtAccessTokens> {
    Arc::new(JwtAccessTokens::new(settings, clock))
}

/// Build the HTTP state from configuration.
///
/// Uses the Diesel repositories when a pool is configured, otherwise a single
/// in-memory store backs both repositories.
pub(super) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = build_tokens(&config.tokens, clock.clone());
    match &config.db_pool {
        Some(pool) => build_db_state(pool, clock, tokens),
        None => build_memory_state(clock, tokens),
    }
}
