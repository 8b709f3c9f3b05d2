//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::ports::{
    MockAccessTokens, MockAccountCommand, MockPostsCommand, MockPostsQuery, MockUserProfileQuery,
    TokenError,
};
use crate::domain::{
    AuthorSummary, EmailAddress, Post, PostContent, PostId, PostParts, PostStatus, PostTitle,
    User, UserId, UserName,
};
use crate::inbound::http::state::HttpState;

/// Token accepted by [`tokens_for`].
pub const GOOD_TOKEN: &str = "good-token";

/// Mocked driving ports; unset expectations panic when called.
#[derive(Default)]
pub struct MockPorts {
    pub accounts: MockAccountCommand,
    pub profile: MockUserProfileQuery,
    pub posts: MockPostsQuery,
    pub posts_command: MockPostsCommand,
    pub tokens: MockAccessTokens,
}

impl MockPorts {
    /// Ports whose token verifier accepts [`GOOD_TOKEN`] as `user_id`.
    pub fn signed_in_as(user_id: i64) -> Self {
        Self {
            tokens: tokens_for(user_id),
            ..Self::default()
        }
    }

    pub fn into_data(self) -> web::Data<HttpState> {
        web::Data::new(HttpState {
            accounts: Arc::new(self.accounts),
            profile: Arc::new(self.profile),
            posts: Arc::new(self.posts),
            posts_command: Arc::new(self.posts_command),
            tokens: Arc::new(self.tokens),
        })
    }
}

/// Verifier accepting only [`GOOD_TOKEN`].
pub fn tokens_for(user_id: i64) -> MockAccessTokens {
    let mut tokens = MockAccessTokens::new();
    tokens.expect_verify().returning(move |token| {
        if token == GOOD_TOKEN {
            UserId::new(user_id).map_err(|err| TokenError::malformed(err.to_string()))
        } else {
            Err(TokenError::malformed("unknown test token"))
        }
    });
    tokens
}

/// `Authorization` header carrying [`GOOD_TOKEN`].
pub fn bearer() -> (&'static str, String) {
    ("Authorization", format!("Bearer {GOOD_TOKEN}"))
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn sample_user(id: i64) -> User {
    User::new(
        UserId::new(id).expect("valid id"),
        EmailAddress::parse(&format!("user{id}@example.com")).expect("valid email"),
        UserName::parse(&format!("User {id}")).expect("valid name"),
        fixed_time(),
        fixed_time(),
    )
}

pub fn sample_post(id: i64, author_id: i64, status: PostStatus) -> Post {
    let author = sample_user(author_id);
    Post::new(PostParts {
        id: PostId::new(id).expect("valid id"),
        title: PostTitle::parse(&format!("Post {id}")).expect("valid title"),
        content: PostContent::parse("Body long enough to pass").expect("valid content"),
        excerpt: None,
        status,
        author: AuthorSummary {
            id: author.id(),
            name: author.name().clone(),
            email: author.email().clone(),
        },
        created_at: fixed_time(),
        updated_at: fixed_time(),
    })
}
