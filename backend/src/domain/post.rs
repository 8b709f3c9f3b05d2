//! Blog post model and the validated payloads that create, change and list
//! posts.

use std::fmt;

use chrono::{DateTime, Utc};
use pagination::PageRequest;
use serde::{Deserialize, Serialize};

use super::{EmailAddress, FieldErrors, UserId, UserName};

/// Maximum accepted title length in characters.
pub const TITLE_MAX: usize = 200;
/// Minimum accepted content length in characters.
pub const CONTENT_MIN: usize = 10;

/// Validation errors for post fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostValidationError {
    /// Identifiers are positive integers.
    #[error("Invalid post ID")]
    InvalidId,
    /// Title blank at creation.
    #[error("Title is required")]
    TitleRequired,
    /// Title blank in an update.
    #[error("Title cannot be empty")]
    TitleEmpty,
    /// Title exceeds [`TITLE_MAX`].
    #[error("Title must be at most {max} characters")]
    TitleTooLong { max: usize },
    /// Content shorter than [`CONTENT_MIN`].
    #[error("Content must be at least 10 characters long")]
    ContentTooShort,
    /// Status outside the two known values.
    #[error("Status must be either draft or published")]
    InvalidStatus,
}

/// Stable post identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    /// Validate and construct a [`PostId`].
    pub fn new(id: i64) -> Result<Self, PostValidationError> {
        if id <= 0 {
            return Err(PostValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::str::FromStr for PostId {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<i64>()
            .map_err(|_| PostValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication state of a post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    /// Not yet public; the initial state.
    #[default]
    Draft,
    /// Public.
    Published,
}

impl PostStatus {
    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    /// Lenient parse used by list filters: unknown values mean "no filter".
    pub fn parse_filter(raw: Option<&str>) -> Option<Self> {
        raw.and_then(|value| value.parse().ok())
    }
}

impl std::str::FromStr for PostStatus {
    type Err = PostValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            _ => Err(PostValidationError::InvalidStatus),
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed post title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostTitle(String);

impl PostTitle {
    /// Validate a title; `empty` is the error reported for blank input.
    fn parse_with(raw: &str, empty: PostValidationError) -> Result<Self, PostValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(empty);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(PostValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate a title supplied at creation.
    pub fn parse(raw: &str) -> Result<Self, PostValidationError> {
        Self::parse_with(raw, PostValidationError::TitleRequired)
    }
}

impl AsRef<str> for PostTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Trimmed post body of at least [`CONTENT_MIN`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostContent(String);

impl PostContent {
    /// Validate post content.
    pub fn parse(raw: &str) -> Result<Self, PostValidationError> {
        let trimmed = raw.trim();
        if trimmed.chars().count() < CONTENT_MIN {
            return Err(PostValidationError::ContentTooShort);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

fn normalise_excerpt(raw: &str) -> String {
    raw.trim().to_owned()
}

/// Author details embedded in every post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    /// Author id; equal to the post's `authorId`.
    pub id: UserId,
    /// Author display name.
    pub name: UserName,
    /// Author email.
    pub email: EmailAddress,
}

/// A stored post with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    id: PostId,
    title: PostTitle,
    content: PostContent,
    excerpt: Option<String>,
    status: PostStatus,
    author_id: UserId,
    author: AuthorSummary,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Field bundle used to assemble a [`Post`] from storage.
#[derive(Debug, Clone)]
pub struct PostParts {
    pub id: PostId,
    pub title: PostTitle,
    pub content: PostContent,
    pub excerpt: Option<String>,
    pub status: PostStatus,
    pub author: AuthorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Assemble a post; `authorId` is taken from the author summary.
    pub fn new(parts: PostParts) -> Self {
        let PostParts {
            id,
            title,
            content,
            excerpt,
            status,
            author,
            created_at,
            updated_at,
        } = parts;
        Self {
            id,
            title,
            content,
            excerpt,
            status,
            author_id: author.id,
            author,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    pub fn content(&self) -> &PostContent {
        &self.content
    }

    pub fn excerpt(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    pub fn status(&self) -> PostStatus {
        self.status
    }

    /// Owner of the post.
    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn author(&self) -> &AuthorSummary {
        &self.author
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Return a copy with `changes` applied and `updated_at` set to `now`.
    pub fn with_changes(mut self, changes: &PostChanges, now: DateTime<Utc>) -> Self {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(content) = &changes.content {
            self.content = content.clone();
        }
        if let Some(excerpt) = &changes.excerpt {
            self.excerpt = Some(excerpt.clone());
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
        self.updated_at = now;
        self
    }
}

/// Validated creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: PostTitle,
    pub content: PostContent,
    pub excerpt: Option<String>,
    pub status: PostStatus,
    pub author_id: UserId,
}

/// Raw creation inputs as received from a client.
#[derive(Debug, Clone, Default)]
pub struct PostDraft<'a> {
    pub title: Option<&'a str>,
    pub content: Option<&'a str>,
    pub excerpt: Option<&'a str>,
    pub status: Option<&'a str>,
}

impl NewPost {
    /// Validate a draft for `author_id`, reporting every failing field.
    ///
    /// # Examples
    /// ```
    /// use pressroom::domain::{NewPost, PostDraft, PostStatus, UserId};
    ///
    /// let author = UserId::new(1).unwrap();
    /// let post = NewPost::try_from_draft(
    ///     PostDraft { title: Some("Hello"), content: Some("Long enough body"), ..Default::default() },
    ///     author,
    /// )
    /// .unwrap();
    /// assert_eq!(post.status, PostStatus::Draft);
    /// ```
    pub fn try_from_draft(draft: PostDraft<'_>, author_id: UserId) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.check("title", PostTitle::parse(draft.title.unwrap_or_default()));
        let content = errors.check(
            "content",
            PostContent::parse(draft.content.unwrap_or_default()),
        );
        let status = match draft.status {
            Some(raw) => errors.check("status", raw.parse::<PostStatus>()),
            None => Some(PostStatus::default()),
        };

        match (title, content, status, errors.finish()) {
            (Some(title), Some(content), Some(status), Ok(())) => Ok(Self {
                title,
                content,
                excerpt: draft.excerpt.map(normalise_excerpt),
                status,
                author_id,
            }),
            (_, _, _, Err(errors)) => Err(errors),
            _ => Err(FieldErrors::new()),
        }
    }
}

/// Validated partial update; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<PostTitle>,
    pub content: Option<PostContent>,
    /// A supplied excerpt replaces the stored one, even when empty.
    pub excerpt: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostChanges {
    /// Validate update inputs, reporting every failing field.
    pub fn try_from_draft(draft: PostDraft<'_>) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = draft.title.and_then(|raw| {
            errors.check(
                "title",
                PostTitle::parse_with(raw, PostValidationError::TitleEmpty),
            )
        });
        let content = draft
            .content
            .and_then(|raw| errors.check("content", PostContent::parse(raw)));
        let status = draft
            .status
            .and_then(|raw| errors.check("status", raw.parse::<PostStatus>()));
        errors.finish()?;

        Ok(Self {
            title,
            content,
            excerpt: draft.excerpt.map(normalise_excerpt),
            status,
        })
    }
}

/// Filters and paging for the public post listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostListQuery {
    pub page: PageRequest,
    /// Case-insensitive substring matched against title, content and excerpt.
    pub search: Option<String>,
    pub status: Option<PostStatus>,
}

impl PostListQuery {
    /// Build a query from raw query-string values, dropping anything unusable.
    ///
    /// # Examples
    /// ```
    /// use pressroom::domain::{PostListQuery, PostStatus};
    ///
    /// let query = PostListQuery::from_raw(Some("2"), Some("x"), Some("  "), Some("published"));
    /// assert_eq!(query.page.page(), 2);
    /// assert_eq!(query.page.limit(), 10);
    /// assert_eq!(query.search, None);
    /// assert_eq!(query.status, Some(PostStatus::Published));
    /// ```
    pub fn from_raw(
        page: Option<&str>,
        limit: Option<&str>,
        search: Option<&str>,
        status: Option<&str>,
    ) -> Self {
        let search = search
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_owned);
        Self {
            page: PageRequest::from_query(page, limit),
            search,
            status: PostStatus::parse_filter(status),
        }
    }

    /// Whether `post` satisfies the search and status filters.
    pub fn matches(&self, post: &Post) -> bool {
        if self.status.is_some_and(|status| status != post.status()) {
            return false;
        }
        let Some(needle) = self.search.as_deref().map(str::to_lowercase) else {
            return true;
        };
        let hit = |haystack: &str| haystack.to_lowercase().contains(&needle);
        hit(post.title().as_ref())
            || hit(post.content().as_ref())
            || post.excerpt().is_some_and(hit)
    }
}
