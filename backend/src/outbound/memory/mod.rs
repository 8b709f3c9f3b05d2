//! In-process store used when no database URL is configured.
//!
//! One [`InMemoryStore`] backs both the user and post repository ports so
//! posts can resolve their authors. Every operation takes the lock once, which
//! serialises writers; data is lost on restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::{Clock, DefaultClock};
use parking_lot::RwLock;

use crate::domain::ports::{
    PostRepository, PostRepositoryError, PostSlice, UserRepository, UserRepositoryError,
};
use crate::domain::{
    AuthorSummary, EmailAddress, NewPost, NewUser, PasswordHash, Post, PostChanges, PostId,
    PostListQuery, PostParts, ProfileChanges, User, UserCredentials, UserId,
};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

#[derive(Default)]
struct State {
    users: BTreeMap<UserId, StoredUser>,
    posts: BTreeMap<PostId, Post>,
    last_user_id: i64,
    last_post_id: i64,
}

impl State {
    fn email_owner(&self, email: &EmailAddress) -> Option<&StoredUser> {
        self.users.values().find(|stored| stored.user.email() == email)
    }

    fn author(&self, id: UserId) -> Option<AuthorSummary> {
        self.users.get(&id).map(|stored| AuthorSummary {
            id,
            name: stored.user.name().clone(),
            email: stored.user.email().clone(),
        })
    }

    /// Refresh the author copy embedded in every post by `user`.
    fn sync_author(&mut self, user: &User) {
        let Some(author) = self.author(user.id()) else {
            return;
        };
        for post in self.posts.values_mut() {
            if post.author_id() == user.id() {
                *post = rebuild(post, author.clone());
            }
        }
    }
}

fn rebuild(post: &Post, author: AuthorSummary) -> Post {
    Post::new(PostParts {
        id: post.id(),
        title: post.title().clone(),
        content: post.content().clone(),
        excerpt: post.excerpt().map(str::to_owned),
        status: post.status(),
        author,
        created_at: post.created_at(),
        updated_at: post.updated_at(),
    })
}

/// Thread-safe in-memory implementation of the repository ports.
#[derive(Clone)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryStore {
    /// Create an empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Arc::new(RwLock::new(State::default())),
            clock,
        }
    }

    fn now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    fn next_id<T>(counter: &mut i64, build: impl Fn(i64) -> Result<T, String>) -> Result<T, String> {
        *counter += 1;
        build(*counter)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        let state = self.state.read();
        Ok(state.email_owner(email).map(|stored| UserCredentials {
            user: stored.user.clone(),
            password_hash: stored.password_hash.clone(),
        }))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(self.state.read().users.get(&id).map(|stored| stored.user.clone()))
    }

    async fn create(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let now = self.now();
        let mut state = self.state.write();
        if state.email_owner(&user.email).is_some() {
            return Err(UserRepositoryError::duplicate_email(user.email.as_ref()));
        }

        let id = Self::next_id(&mut state.last_user_id, |raw| {
            UserId::new(raw).map_err(|err| err.to_string())
        })
        .map_err(UserRepositoryError::query)?;
        let created = User::new(id, user.email.clone(), user.name.clone(), now, now);
        state.users.insert(
            id,
            StoredUser {
                user: created.clone(),
                password_hash: user.password_hash.clone(),
            },
        );
        Ok(created)
    }

    async fn update_profile(
        &self,
        id: UserId,
        changes: &ProfileChanges,
    ) -> Result<Option<User>, UserRepositoryError> {
        let now = self.now();
        let mut state = self.state.write();
        if let Some(email) = &changes.email {
            if state
                .email_owner(email)
                .is_some_and(|owner| owner.user.id() != id)
            {
                return Err(UserRepositoryError::duplicate_email(email.as_ref()));
            }
        }

        let Some(stored) = state.users.get_mut(&id) else {
            return Ok(None);
        };
        let current = &stored.user;
        let updated = User::new(
            id,
            changes.email.clone().unwrap_or_else(|| current.email().clone()),
            changes.name.clone().unwrap_or_else(|| current.name().clone()),
            current.created_at(),
            now,
        );
        stored.user = updated.clone();
        state.sync_author(&updated);
        Ok(Some(updated))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(&self, query: &PostListQuery) -> Result<PostSlice, PostRepositoryError> {
        let state = self.state.read();
        let mut matching: Vec<&Post> = state
            .posts
            .values()
            .filter(|post| query.matches(post))
            .collect();
        matching.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });

        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);
        let posts = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(PostSlice { posts, total })
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, PostRepositoryError> {
        Ok(self.state.read().posts.get(&id).cloned())
    }

    async fn create(&self, post: &NewPost) -> Result<Post, PostRepositoryError> {
        let now = self.now();
        let mut state = self.state.write();
        let author = state
            .author(post.author_id)
            .ok_or_else(|| PostRepositoryError::unknown_author(post.author_id.get()))?;

        let id = Self::next_id(&mut state.last_post_id, |raw| {
            PostId::new(raw).map_err(|err| err.to_string())
        })
        .map_err(PostRepositoryError::query)?;
        let created = Post::new(PostParts {
            id,
            title: post.title.clone(),
            content: post.content.clone(),
            excerpt: post.excerpt.clone(),
            status: post.status,
            author,
            created_at: now,
            updated_at: now,
        });
        state.posts.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<Post>, PostRepositoryError> {
        let now = self.now();
        let mut state = self.state.write();
        let Some(existing) = state.posts.remove(&id) else {
            return Ok(None);
        };
        let updated = existing.with_changes(changes, now);
        state.posts.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        Ok(self.state.write().posts.remove(&id).is_some())
    }
}
