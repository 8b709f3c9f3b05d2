//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-run the
//! domain validation so corrupt rows surface as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::{
    AuthorSummary, EmailAddress, PasswordHash, Post, PostContent, PostId, PostParts, PostTitle,
    User, UserCredentials, UserId, UserName,
};

use super::schema::{posts, users};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for profile updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserUpdate<'a> {
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the posts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = posts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating posts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub(crate) struct NewPostRow<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub excerpt: Option<&'a str>,
    pub status: &'a str,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Changeset for partial post updates; `None` columns are left untouched.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = posts)]
pub(crate) struct PostUpdate<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub excerpt: Option<&'a str>,
    pub status: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Reason a stored row failed domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("corrupt {table} row {id}: {reason}")]
pub(crate) struct CorruptRow {
    pub table: &'static str,
    pub id: i64,
    pub reason: String,
}

impl CorruptRow {
    fn user(id: i64, reason: impl ToString) -> Self {
        Self {
            table: "users",
            id,
            reason: reason.to_string(),
        }
    }

    fn post(id: i64, reason: impl ToString) -> Self {
        Self {
            table: "posts",
            id,
            reason: reason.to_string(),
        }
    }
}

impl UserRow {
    /// Public view of the account.
    pub fn into_user(self) -> Result<User, CorruptRow> {
        Ok(self.into_credentials()?.user)
    }

    /// Account plus its stored password hash.
    pub fn into_credentials(self) -> Result<UserCredentials, CorruptRow> {
        let id = self.id;
        let user = User::new(
            UserId::new(id).map_err(|err| CorruptRow::user(id, err))?,
            EmailAddress::parse(&self.email).map_err(|err| CorruptRow::user(id, err))?,
            UserName::parse(&self.name).map_err(|err| CorruptRow::user(id, err))?,
            self.created_at,
            self.updated_at,
        );
        Ok(UserCredentials {
            user,
            password_hash: PasswordHash::new(self.password_hash),
        })
    }

    /// Embedded author details for a post.
    pub fn author_summary(&self) -> Result<AuthorSummary, CorruptRow> {
        let id = self.id;
        Ok(AuthorSummary {
            id: UserId::new(id).map_err(|err| CorruptRow::user(id, err))?,
            name: UserName::parse(&self.name).map_err(|err| CorruptRow::user(id, err))?,
            email: EmailAddress::parse(&self.email).map_err(|err| CorruptRow::user(id, err))?,
        })
    }
}

impl PostRow {
    /// Combine the row with its author into a domain post.
    pub fn into_post(self, author: AuthorSummary) -> Result<Post, CorruptRow> {
        let id = self.id;
        if author.id.get() != self.author_id {
            return Err(CorruptRow::post(id, "author mismatch"));
        }
        Ok(Post::new(PostParts {
            id: PostId::new(id).map_err(|err| CorruptRow::post(id, err))?,
            title: PostTitle::parse(&self.title).map_err(|err| CorruptRow::post(id, err))?,
            content: PostContent::parse(&self.content).map_err(|err| CorruptRow::post(id, err))?,
            excerpt: self.excerpt,
            status: self
                .status
                .parse()
                .map_err(|err| CorruptRow::post(id, err))?,
            author,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}
