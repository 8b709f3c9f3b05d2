//! Port for minting and checking bearer tokens.
//!
//! Verification is pure computation, so the trait is synchronous.

use crate::domain::{IssuedToken, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Unparseable token, bad signature, wrong algorithm or bad subject.
        Malformed { message: String } => "malformed token: {message}",
        /// The token's expiry has passed.
        Expired => "token expired",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

/// Issues and verifies signed bearer tokens for a user id.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokens: Send + Sync {
    /// Sign a token for `subject` valid for the configured lifetime.
    fn issue(&self, subject: UserId) -> Result<IssuedToken, TokenError>;

    /// Check signature then expiry, returning the embedded subject.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
