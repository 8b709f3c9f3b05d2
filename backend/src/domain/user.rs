//! User identity model.
//!
//! Accounts are identified by a positive integer id and a unique, normalised
//! email address. The password hash lives on [`UserCredentials`] only and is
//! never serialised.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

use super::FieldErrors;

/// Maximum accepted email length in characters.
pub const EMAIL_MAX: usize = 254;
/// Maximum accepted name length in characters.
pub const NAME_MAX: usize = 100;

const NAME_BLANK: &str = "Name cannot be empty";

/// Validation errors for user fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifiers are positive integers.
    #[error("user id must be a positive integer")]
    InvalidId,
    /// The email does not look like `local@domain.tld`.
    #[error("Please provide a valid email")]
    InvalidEmail,
    /// The email exceeds [`EMAIL_MAX`].
    #[error("Email must be at most {max} characters")]
    EmailTooLong { max: usize },
    /// The name was blank once trimmed.
    #[error("Name is required")]
    EmptyName,
    /// The name exceeds [`NAME_MAX`].
    #[error("Name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Stable user identifier assigned by the credential store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use pressroom::domain::UserId;
    ///
    /// assert!(UserId::new(7).is_ok());
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(id: i64) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::str::FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .parse::<i64>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Normalised email address: trimmed and lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalise and validate an email address.
    ///
    /// # Examples
    /// ```
    /// use pressroom::domain::EmailAddress;
    ///
    /// let email = EmailAddress::parse("  Ada@Example.COM ").unwrap();
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// ```
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let normalised = raw.trim().to_lowercase();
        if normalised.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&normalised) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trimmed, non-empty user name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Trim and validate a user name.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong { max: NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public view of an account.
///
/// Serialises as `{"id", "email", "name", "createdAt"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: EmailAddress,
    name: UserName,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user from validated parts.
    pub fn new(
        id: UserId,
        email: EmailAddress,
        name: UserName,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            created_at,
            updated_at,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Normalised email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Display name.
    pub fn name(&self) -> &UserName {
        &self.name
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Encoded password hash as produced by a [`crate::domain::ports::PasswordHasher`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash string.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// A user together with their stored password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Account the hash belongs to.
    pub user: User,
    /// Stored password hash.
    pub password_hash: PasswordHash,
}

/// Record handed to the credential store when registering an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Normalised, unique email.
    pub email: EmailAddress,
    /// Display name.
    pub name: UserName,
    /// Hash of the chosen password.
    pub password_hash: PasswordHash,
}

/// Partial update applied to a user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// Replacement name, when supplied.
    pub name: Option<UserName>,
    /// Replacement email, when supplied.
    pub email: Option<EmailAddress>,
}

impl ProfileChanges {
    /// Validate the optional profile fields, reporting every failing field.
    ///
    /// Absent fields are left unchanged; a supplied blank name is rejected.
    ///
    /// # Examples
    /// ```
    /// use pressroom::domain::ProfileChanges;
    ///
    /// let changes = ProfileChanges::try_from_parts(Some(" Ada "), None).expect("valid");
    /// assert_eq!(changes.name.map(|name| name.to_string()).as_deref(), Some("Ada"));
    /// assert!(ProfileChanges::try_from_parts(Some(""), Some("bad")).is_err());
    /// ```
    pub fn try_from_parts(name: Option<&str>, email: Option<&str>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = name.and_then(|raw| {
            let parsed = UserName::parse(raw).map_err(|err| match err {
                UserValidationError::EmptyName => NAME_BLANK.to_owned(),
                other => other.to_string(),
            });
            errors.check("name", parsed)
        });
        let email = email.and_then(|raw| errors.check("email", EmailAddress::parse(raw)));
        errors.finish()?;
        Ok(Self { name, email })
    }

    /// Whether the update touches no field.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}
