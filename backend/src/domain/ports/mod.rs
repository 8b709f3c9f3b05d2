//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`], [`AccessTokens`]) are
//! implemented by outbound adapters. Driving ports ([`AccountCommand`],
//! [`UserProfileQuery`], [`PostsQuery`], [`PostsCommand`]) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod access_tokens;
mod account_command;
mod password_hasher;
mod post_repository;
mod posts_command;
mod posts_query;
mod user_profile_query;
mod user_repository;

#[cfg(test)]
pub use access_tokens::MockAccessTokens;
pub use access_tokens::{AccessTokens, TokenError};
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::AccountCommand;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostRepository, PostRepositoryError, PostSlice};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::{DeletePostRequest, PostsCommand, UpdatePostRequest};
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
