//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Emails are stored already normalised by the domain, so the unique
//! constraint on `users.email` is the final arbiter of duplicates.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use mockable::Clock;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{EmailAddress, NewUser, ProfileChanges, User, UserCredentials, UserId};

use super::diesel_helpers::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{CorruptRow, NewUserRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselUserRepository {
    /// Create a repository over `pool` that stamps rows with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    UserRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(
    error: diesel::result::Error,
    operation: &'static str,
    email: Option<&str>,
) -> UserRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::Connection(message) => UserRepositoryError::connection(message),
        DieselFailure::UniqueViolation { .. } => {
            UserRepositoryError::duplicate_email(email.unwrap_or_default())
        }
        DieselFailure::ForeignKeyViolation { .. } => {
            UserRepositoryError::query("foreign key violation")
        }
        DieselFailure::Query(message) => UserRepositoryError::query(message),
    }
}

fn map_corrupt_row(error: CorruptRow) -> UserRepositoryError {
    UserRepositoryError::query(error.to_string())
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by email", None))?;

        row.map(UserRow::into_credentials)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find user by id", None))?;

        row.map(UserRow::into_user)
            .transpose()
            .map_err(map_corrupt_row)
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = self.clock.utc();
        let new_row = NewUserRow {
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_ref(),
            name: user.name.as_ref(),
            created_at: now,
            updated_at: now,
        };
        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert user", Some(user.email.as_ref())))?;

        row.into_user().map_err(map_corrupt_row)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = UserUpdate {
            email: changes.email.as_ref().map(AsRef::as_ref),
            name: changes.name.as_ref().map(AsRef::as_ref),
            updated_at: self.clock.utc(),
        };
        let email = update.email;
        let row: Option<UserRow> = diesel::update(users::table.find(id.get()))
            .set(&update)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "update user profile", email))?;

        row.map(UserRow::into_user)
            .transpose()
            .map_err(map_corrupt_row)
    }
}
