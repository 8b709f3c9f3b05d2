//! Driving port for account use-cases: registration, login and profile
//! updates.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate callers without knowing the credential store, hasher or token
//! signer behind it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, ProfileChanges, Registration, Session, User, UserId};

/// Domain use-case port for account mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Create an account and sign the caller in.
    async fn register(&self, registration: Registration) -> Result<Session, Error>;

    /// Check credentials and sign the caller in.
    async fn login(&self, credentials: LoginCredentials) -> Result<Session, Error>;

    /// Change the authenticated user's name or email.
    async fn update_profile(&self, user_id: UserId, changes: ProfileChanges)
    -> Result<User, Error>;
}
