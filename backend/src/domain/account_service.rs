//! Account domain service.
//!
//! Implements the account driving ports on top of the credential store, the
//! password hasher and the token signer.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    AccessTokens, AccountCommand, PasswordHashError, PasswordHasher, TokenError,
    UserProfileQuery, UserRepository, UserRepositoryError,
};
use crate::domain::{
    EmailAddress, Error, LoginCredentials, NewUser, ProfileChanges, Registration, Session, User,
    UserId,
};

/// Message returned when an email is already registered.
pub const EMAIL_TAKEN: &str = "User already exists with this email";
/// Message returned for any failed login.
pub const INVALID_LOGIN: &str = "Invalid email or password";
/// Message returned when the authenticated user no longer exists.
pub const USER_NOT_FOUND: &str = "User not found";

/// Account service implementing [`AccountCommand`] and [`UserProfileQuery`].
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AccountService<U, H, T> {
    /// Create a new service with the given adapters.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

impl<U, H, T> AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: AccessTokens,
{
    fn map_user_error(error: UserRepositoryError) -> Error {
        match error {
            UserRepositoryError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserRepositoryError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
            UserRepositoryError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN),
        }
    }

    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(error.to_string())
    }

    fn map_token_error(error: TokenError) -> Error {
        Error::internal(error.to_string())
    }

    fn start_session(&self, user: User) -> Result<Session, Error> {
        let issued = self
            .tokens
            .issue(user.id())
            .map_err(Self::map_token_error)?;
        Ok(Session::new(user, issued))
    }

    async fn ensure_email_free(
        &self,
        email: &EmailAddress,
        owner: Option<UserId>,
    ) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_email(email)
            .await
            .map_err(Self::map_user_error)?;
        match existing {
            Some(found) if Some(found.user.id()) != owner => Err(Error::conflict(EMAIL_TAKEN)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<U, H, T> AccountCommand for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: AccessTokens,
{
    async fn register(&self, registration: Registration) -> Result<Session, Error> {
        self.ensure_email_free(registration.email(), None).await?;

        let password_hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(Self::map_hash_error)?;
        let user = self
            .users
            .create(&NewUser {
                email: registration.email().clone(),
                name: registration.name().clone(),
                password_hash,
            })
            .await
            .map_err(Self::map_user_error)?;

        self.start_session(user)
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<Session, Error> {
        let Some(stored) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(Self::map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_LOGIN));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &stored.password_hash)
            .await
            .map_err(Self::map_hash_error)?;
        if !matches {
            return Err(Error::unauthorized(INVALID_LOGIN));
        }

        self.start_session(stored.user)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        changes: ProfileChanges,
    ) -> Result<User, Error> {
        if let Some(email) = &changes.email {
            self.ensure_email_free(email, Some(user_id)).await?;
        }

        self.users
            .update_profile(user_id, &changes)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<U, H, T> UserProfileQuery for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: AccessTokens,
{
    async fn fetch_profile(&self, user_id: UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(Self::map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
