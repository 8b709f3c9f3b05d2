//! HS256 bearer tokens backed by `jsonwebtoken`.
//!
//! Tokens carry `sub` (the user id as a decimal string), `iat` and `exp` in
//! Unix seconds. Expiry is checked against the injected clock rather than the
//! library's wall-clock check, after the signature has been verified.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::domain::ports::{AccessTokens, TokenError};
use crate::domain::{IssuedToken, UserId};

/// Default token lifetime: 24 hours.
pub const DEFAULT_TTL: Duration = Duration::from_secs(86_400);

/// Signing secret and token lifetime.
#[derive(Clone)]
pub struct TokenSettings {
    secret: Zeroizing<String>,
    ttl: Duration,
}

impl TokenSettings {
    /// Build settings from an already validated secret.
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            ttl,
        }
    }

    /// Token lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"..")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// [`AccessTokens`] adapter signing with a shared HMAC secret.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// use mockable::DefaultClock;
/// use pressroom::domain::UserId;
/// use pressroom::domain::ports::AccessTokens;
/// use pressroom::outbound::token::{JwtAccessTokens, TokenSettings};
///
/// let settings = TokenSettings::new("an example secret", Duration::from_secs(60));
/// let tokens = JwtAccessTokens::new(&settings, Arc::new(DefaultClock));
/// let user = UserId::new(7).expect("valid id");
///
/// let issued = tokens.issue(user).expect("token issued");
/// assert_eq!(tokens.verify(issued.token()), Ok(user));
/// ```
pub struct JwtAccessTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtAccessTokens {
    /// Create an adapter for `settings`, reading time from `clock`.
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let secret = settings.secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl: settings.ttl(),
            clock,
        }
    }

    fn expiry(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>, TokenError> {
        TimeDelta::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| TokenError::signing("token lifetime out of range"))
    }
}

impl AccessTokens for JwtAccessTokens {
    fn issue(&self, subject: UserId) -> Result<IssuedToken, TokenError> {
        let now = self.clock.utc();
        let expires_at = self.expiry(now)?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))?;
        Ok(IssuedToken::new(token, expires_at))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::malformed(err.to_string()))?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        data.claims
            .sub
            .parse::<UserId>()
            .map_err(|err| TokenError::malformed(err.to_string()))
    }
}
