//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, NewUser, ProfileChanges, User, UserCredentials, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Credential store keyed by id and by normalised email.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user and their password hash by email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserRepositoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Insert a new account, failing with `DuplicateEmail` when taken.
    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Apply profile changes; `None` when the user does not exist.
    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserRepositoryError>;
}
