//! Authentication primitives: registration and login payloads, the request
//! identity and issued tokens.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use chrono::{DateTime, Utc};
use serde::Serialize;
use zeroize::Zeroizing;

use super::{EmailAddress, FieldErrors, User, UserId, UserName};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 8;
/// Message for a request that reaches a protected operation without an
/// identity.
pub const NO_TOKEN: &str = "Access denied. No token provided.";

const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
const PASSWORD_REQUIRED: &str = "Password is required";

/// Validated registration request.
///
/// ## Invariants
/// - `email` is normalised and well formed.
/// - `password` holds at least [`PASSWORD_MIN`] characters and is kept
///   verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: EmailAddress,
    name: UserName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration inputs, reporting every failing field.
    ///
    /// # Examples
    /// ```
    /// use pressroom::domain::Registration;
    ///
    /// let reg = Registration::try_from_parts("ADA@example.com", "Ada", "hunter22").unwrap();
    /// assert_eq!(reg.email().as_ref(), "ada@example.com");
    /// assert!(Registration::try_from_parts("nope", "", "short").is_err());
    /// ```
    pub fn try_from_parts(email: &str, name: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = errors.check("email", EmailAddress::parse(email));
        if password.chars().count() < PASSWORD_MIN {
            errors.push("password", PASSWORD_TOO_SHORT);
        }
        let name = errors.check("name", UserName::parse(name));

        match (email, name, errors.finish()) {
            (Some(email), Some(name), Ok(())) => Ok(Self {
                email,
                name,
                password: Zeroizing::new(password.to_owned()),
            }),
            (_, _, Err(errors)) => Err(errors),
            _ => Err(FieldErrors::new()),
        }
    }

    /// Normalised email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Chosen password.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `email` is normalised so lookups match registration.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use pressroom::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("ada@example.com", "password").unwrap();
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = errors.check("email", EmailAddress::parse(email));
        if password.is_empty() {
            errors.push("password", PASSWORD_REQUIRED);
        }

        match (email, errors.finish()) {
            (Some(email), Ok(())) => Ok(Self {
                email,
                password: Zeroizing::new(password.to_owned()),
            }),
            (_, Err(errors)) => Err(errors),
            (None, Ok(())) => Err(FieldErrors::new()),
        }
    }

    /// Email used for the credential lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Identity established by the authentication gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    user_id: UserId,
}

impl AuthContext {
    /// Wrap a verified subject id.
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Authenticated user id.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Signed bearer token together with its expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Pair a token string with its expiry instant.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Encoded token.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Instant after which verification fails.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Result of a successful registration or login.
///
/// Serialises as `{"user": {...}, "token": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Authenticated account.
    pub user: User,
    /// Bearer token string.
    pub token: String,
}

impl Session {
    /// Build a session from the account and its freshly issued token.
    pub fn new(user: User, issued: IssuedToken) -> Self {
        Self {
            user,
            token: issued.token,
        }
    }
}
