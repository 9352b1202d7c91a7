//! Entity store: durable records for users, posts, tags and comments.
//!
//! The store is the only shared mutable resource in the service. Everything
//! above it (relationship engine, feed assembler, search adapter) talks to
//! the [`EntityStore`] trait through an `Arc<dyn EntityStore>`, so the
//! backing implementation can be swapped without touching the engine.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use std::collections::HashMap;
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag, User};

/// Errors raised by store implementations.
///
/// `Conflict` is the uniqueness backstop (username, email, tag name);
/// `Unavailable` is a failed or timed-out backend call and surfaces to
/// callers as a transient failure, never silently retried.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("uniqueness violation on {field}")]
    Conflict { field: &'static str },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Contract for the entity store.
///
/// Create enforces uniqueness constraints at write time. Updates are
/// whole-record writes keyed by the opaque id assigned at creation; the
/// engine re-reads current state before every conditional write, so a
/// stale update never reintroduces a removed relationship edge on its own
/// record. Batch resolve returns a map with missing ids simply absent.
/// Ordering of `recent_posts` / `posts_by_author` is owned by the store:
/// newest first, ties broken by id descending so pagination stays stable.
#[async_trait]
pub trait EntityStore: Send + Sync {
    // Users
    async fn insert_user(&self, user: User) -> StoreResult<()>;
    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    /// Whole-record write. Unique indexes follow identity changes; a write
    /// that would take another user's handle or email conflicts.
    async fn put_user(&self, user: User) -> StoreResult<bool>;
    /// Multi-record write, atomic with respect to concurrent readers.
    /// This is the store-level transaction the follow toggle relies on.
    async fn put_users(&self, users: Vec<User>) -> StoreResult<()>;
    async fn delete_user(&self, id: Uuid) -> StoreResult<bool>;
    async fn resolve_users(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, User>>;

    // Posts
    async fn insert_post(&self, post: Post) -> StoreResult<()>;
    async fn get_post(&self, id: Uuid) -> StoreResult<Option<Post>>;
    async fn put_post(&self, post: Post) -> StoreResult<bool>;
    async fn delete_post(&self, id: Uuid) -> StoreResult<bool>;
    async fn resolve_posts(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Post>>;
    /// Posts newest first, id-descending tiebreak
    async fn recent_posts(&self, limit: usize, offset: usize) -> StoreResult<Vec<Post>>;
    async fn count_posts(&self) -> StoreResult<usize>;
    /// One author's posts, same ordering as `recent_posts`
    async fn posts_by_author(
        &self,
        author: Uuid,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<Post>>;
    async fn count_posts_by_author(&self, author: Uuid) -> StoreResult<usize>;

    // Tags
    async fn insert_tag(&self, tag: Tag) -> StoreResult<()>;
    async fn get_tag(&self, id: Uuid) -> StoreResult<Option<Tag>>;
    async fn get_tag_by_name(&self, name: &str) -> StoreResult<Option<Tag>>;
    async fn put_tag(&self, tag: Tag) -> StoreResult<bool>;
    async fn resolve_tags(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Tag>>;

    // Comments
    async fn insert_comment(&self, comment: Comment) -> StoreResult<()>;
    async fn get_comment(&self, id: Uuid) -> StoreResult<Option<Comment>>;
    async fn delete_comment(&self, id: Uuid) -> StoreResult<bool>;
    async fn resolve_comments(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Comment>>;

    // Containment scans backing the search adapter; `needle` is already
    // lowercased by the caller, `cap` bounds the result size.
    async fn search_posts(&self, needle: &str, cap: usize) -> StoreResult<Vec<Post>>;
    async fn search_users(&self, needle: &str, cap: usize) -> StoreResult<Vec<User>>;
    async fn search_tags(&self, needle: &str, cap: usize) -> StoreResult<Vec<Tag>>;
}
