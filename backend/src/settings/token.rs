//! Token signing configuration read from the environment.
//!
//! `JWT_SECRET` is mandatory in every build. Release builds refuse secrets
//! shorter than [`SECRET_MIN_LEN`] bytes and invalid `JWT_TTL_SECS` values;
//! debug builds log a warning and carry on.

use std::time::Duration;

use mockable::Env;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::outbound::token::{DEFAULT_TTL, TokenSettings};

pub const SECRET_ENV: &str = "JWT_SECRET";
pub const TTL_ENV: &str = "JWT_TTL_SECS";
/// Minimum secret length accepted by release builds.
pub const SECRET_MIN_LEN: usize = 32;

const FINGERPRINT_BYTES: usize = 8;

/// Build mode for configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate weak values and emit warnings.
    Debug,
    /// Release builds reject weak or invalid values.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pressroom::settings::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// if cfg!(debug_assertions) {
    ///     assert_eq!(mode, BuildMode::Debug);
    /// } else {
    ///     assert_eq!(mode, BuildMode::Release);
    /// }
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Errors raised while validating token configuration.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum TokenConfigError {
    /// A required environment variable is missing or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// The secret is too short for release builds.
    #[error("{name} too short: need >= {min_len} bytes, got {length}")]
    SecretTooShort {
        name: &'static str,
        length: usize,
        min_len: usize,
    },
}

/// Build token settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use mockable::MockEnv;
/// use pressroom::settings::{BuildMode, token_settings_from_env};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|name| match name {
///     "JWT_SECRET" => Some("0123456789abcdef0123456789abcdef".to_owned()),
///     "JWT_TTL_SECS" => Some("3600".to_owned()),
///     _ => None,
/// });
///
/// let settings = token_settings_from_env(&env, BuildMode::Release)?;
/// assert_eq!(settings.ttl().as_secs(), 3600);
/// # Ok(())
/// # }
/// ```
pub fn token_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<TokenSettings, TokenConfigError> {
    let secret = secret_from_env(env, mode)?;
    let ttl = ttl_from_env(env, mode)?;
    Ok(TokenSettings::new(secret, ttl))
}

fn secret_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<String, TokenConfigError> {
    let secret = env
        .string(SECRET_ENV)
        .filter(|value| !value.trim().is_empty())
        .ok_or(TokenConfigError::MissingEnv { name: SECRET_ENV })?;

    let length = secret.len();
    if length < SECRET_MIN_LEN {
        if !mode.is_debug() {
            return Err(TokenConfigError::SecretTooShort {
                name: SECRET_ENV,
                length,
                min_len: SECRET_MIN_LEN,
            });
        }
        warn!(length, min_len = SECRET_MIN_LEN, "JWT_SECRET is short (dev only)");
    }
    Ok(secret)
}

fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<Duration, TokenConfigError> {
    let Some(value) = env.string(TTL_ENV) else {
        return Ok(DEFAULT_TTL);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ if mode.is_debug() => {
            warn!(value = %value, "invalid JWT_TTL_SECS; using the default lifetime");
            Ok(DEFAULT_TTL)
        }
        _ => Err(TokenConfigError::InvalidEnv {
            name: TTL_ENV,
            value,
            expected: "a positive number of seconds",
        }),
    }
}

/// Truncated SHA-256 fingerprint of the signing secret.
///
/// Returns the first 8 bytes of the hash as 16 lowercase hex characters so
/// operators can tell which secret is active without exposing it.
#[must_use]
pub fn secret_fingerprint(settings: &TokenSettings) -> String {
    let digest = Sha256::digest(settings.secret().as_bytes());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
