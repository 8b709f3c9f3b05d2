//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Listing filters on `posts` alone, counts the matches, then loads the page
//! and the authors of that page in a second query.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use mockable::Clock;

use crate::domain::ports::{PostRepository, PostRepositoryError, PostSlice};
use crate::domain::{NewPost, Post, PostChanges, PostId, PostListQuery};

use super::diesel_helpers::{
    DieselFailure, classify_diesel_error, contains_pattern, pool_error_message,
};
use super::models::{CorruptRow, NewPostRow, PostRow, PostUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the `PostRepository` port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl DieselPostRepository {
    /// Create a repository over `pool` that stamps rows with `clock`.
    pub fn new(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    PostRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &'static str) -> PostRepositoryError {
    from_failure(classify_diesel_error(error, operation))
}

fn from_failure(failure: DieselFailure) -> PostRepositoryError {
    match failure {
        DieselFailure::Connection(message) => PostRepositoryError::connection(message),
        DieselFailure::UniqueViolation { constraint } => PostRepositoryError::query(format!(
            "unique violation on {}",
            constraint.as_deref().unwrap_or("unknown constraint")
        )),
        DieselFailure::ForeignKeyViolation { .. } => {
            PostRepositoryError::query("foreign key violation")
        }
        DieselFailure::Query(message) => PostRepositoryError::query(message),
    }
}

fn map_corrupt_row(error: CorruptRow) -> PostRepositoryError {
    PostRepositoryError::query(error.to_string())
}

/// Posts matching the status and search filters, unordered and unpaged.
fn filtered(query: &PostListQuery) -> posts::BoxedQuery<'static, Pg> {
    let mut statement = posts::table.into_boxed();
    if let Some(status) = query.status {
        statement = statement.filter(posts::status.eq(status.as_str()));
    }
    if let Some(search) = query.search.as_deref() {
        let pattern = contains_pattern(search);
        statement = statement.filter(
            posts::title
                .ilike(pattern.clone())
                .or(posts::content.ilike(pattern.clone()))
                .or(posts::excerpt.ilike(pattern)),
        );
    }
    statement
}

async fn load_author(
    conn: &mut AsyncPgConnection,
    author_id: i64,
) -> Result<UserRow, PostRepositoryError> {
    users::table
        .find(author_id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(|err| map_diesel_error(err, "load post author"))?
        .ok_or_else(|| PostRepositoryError::unknown_author(author_id))
}

fn assemble(row: PostRow, author: &UserRow) -> Result<Post, PostRepositoryError> {
    let summary = author.author_summary().map_err(map_corrupt_row)?;
    row.into_post(summary).map_err(map_corrupt_row)
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self, query: &PostListQuery) -> Result<PostSlice, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(query)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "count posts"))?;

        let offset = i64::try_from(query.page.offset()).unwrap_or(i64::MAX);
        let rows: Vec<PostRow> = filtered(query)
            .order((posts::created_at.desc(), posts::id.desc()))
            .limit(i64::from(query.page.limit()))
            .offset(offset)
            .select(PostRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list posts"))?;

        let author_ids: Vec<i64> = rows.iter().map(|row| row.author_id).collect();
        let authors: HashMap<i64, UserRow> = users::table
            .filter(users::id.eq_any(author_ids))
            .select(UserRow::as_select())
            .load::<UserRow>(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "load post authors"))?
            .into_iter()
            .map(|row| (row.id, row))
            .collect();

        let posts = rows
            .into_iter()
            .map(|row| {
                let author = authors
                    .get(&row.author_id)
                    .ok_or_else(|| PostRepositoryError::unknown_author(row.author_id))?;
                assemble(row, author)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PostSlice {
            posts,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<(PostRow, UserRow)> = posts::table
            .inner_join(users::table)
            .filter(posts::id.eq(id.get()))
            .select((PostRow::as_select(), UserRow::as_select()))
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find post by id"))?;

        found
            .map(|(row, author)| assemble(row, &author))
            .transpose()
    }

    async fn create(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_id = post.author_id.get();

        let now = self.clock.utc();
        let new_row = NewPostRow {
            title: post.title.as_ref(),
            content: post.content.as_ref(),
            excerpt: post.excerpt.as_deref(),
            status: post.status.as_str(),
            author_id,
            created_at: now,
            updated_at: now,
        };
        let row: PostRow = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match classify_diesel_error(err, "insert post") {
                DieselFailure::ForeignKeyViolation { .. } => {
                    PostRepositoryError::unknown_author(author_id)
                }
                other => from_failure(other),
            })?;

        let author = load_author(&mut conn, author_id).await?;
        assemble(row, &author)
    }

    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let update = PostUpdate {
            title: changes.title.as_ref().map(AsRef::as_ref),
            content: changes.content.as_ref().map(AsRef::as_ref),
            excerpt: changes.excerpt.as_deref(),
            status: changes.status.map(|status| status.as_str()),
            updated_at: self.clock.utc(),
        };
        let row: Option<PostRow> = diesel::update(posts::table.find(id.get()))
            .set(&update)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "update post"))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let author = load_author(&mut conn, row.author_id).await?;
        assemble(row, &author).map(Some)
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "delete post"))?;
        Ok(removed > 0)
    }
}
