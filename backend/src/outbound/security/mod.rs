//! Argon2id password hashing.
//!
//! Hashing is deliberately slow, so both operations run on the blocking pool
//! to keep actix workers responsive.

use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::domain::{PasswordHash, TraceId};
use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// [`PasswordHasher`] producing PHC-encoded Argon2id hashes with a random salt.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create a hasher with the library's default Argon2id parameters.
    pub fn new() -> Self {
        Self
    }
}

fn hash_blocking(password: &str) -> Result<PasswordHash, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let encoded = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::hash(err.to_string()))?;
    Ok(PasswordHash::new(encoded.to_string()))
}

fn verify_blocking(password: &str, stored: &str) -> Result<bool, PasswordHashError> {
    let parsed = password_hash::PasswordHash::new(stored)
        .map_err(|err| PasswordHashError::malformed(err.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(err) => Err(PasswordHashError::malformed(err.to_string())),
    }
}

async fn on_blocking_pool<T, F>(work: F) -> Result<T, PasswordHashError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, PasswordHashError> + Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || TraceId::in_optional_scope(trace_id, work))
        .await
        .map_err(|err| PasswordHashError::hash(err.to_string()))?
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        on_blocking_pool(move || hash_blocking(&password)).await
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let password = Zeroizing::new(password.to_owned());
        let stored = hash.as_ref().to_owned();
        on_blocking_pool(move || verify_blocking(&password, &stored)).await
    }
}
