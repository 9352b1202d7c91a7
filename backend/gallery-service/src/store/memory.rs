//! In-process entity store.
//!
//! Tables and unique indexes live behind a single `RwLock`, which makes
//! every write (including the multi-record `put_users`) atomic with
//! respect to concurrent readers. Read guards are never held across an
//! await point.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::domain::{Comment, Post, Tag, User};

use super::{EntityStore, StoreError, StoreResult};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    tags: HashMap<Uuid, Tag>,
    comments: HashMap<Uuid, Comment>,
    // Unique indexes, maintained on every insert/delete
    username_index: HashMap<String, Uuid>,
    email_index: HashMap<String, Uuid>,
    tag_name_index: HashMap<String, Uuid>,
}

/// In-memory [`EntityStore`] implementation
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.inner
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.inner
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

/// Newest first; identical timestamps fall back to id so page boundaries
/// do not shift between requests.
fn recency_order(a: &Post, b: &Post) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

fn resolve_from<T: Clone>(table: &HashMap<Uuid, T>, ids: &[Uuid]) -> HashMap<Uuid, T> {
    ids.iter()
        .filter_map(|id| table.get(id).map(|record| (*id, record.clone())))
        .collect()
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert_user(&self, user: User) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.username_index.contains_key(&user.username) {
            return Err(StoreError::Conflict { field: "username" });
        }
        if tables.email_index.contains_key(&user.email) {
            return Err(StoreError::Conflict { field: "email" });
        }
        tables.username_index.insert(user.username.clone(), user.id);
        tables.email_index.insert(user.email.clone(), user.id);
        tables.users.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let tables = self.read()?;
        Ok(tables
            .username_index
            .get(username)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn put_user(&self, user: User) -> StoreResult<bool> {
        let mut tables = self.write()?;
        let (old_username, old_email) = match tables.users.get(&user.id) {
            Some(current) => (current.username.clone(), current.email.clone()),
            None => return Ok(false),
        };

        // Unique indexes follow identity changes; a write that would take
        // another user's handle or email is refused.
        if user.username != old_username {
            if let Some(owner) = tables.username_index.get(&user.username) {
                if *owner != user.id {
                    return Err(StoreError::Conflict { field: "username" });
                }
            }
            tables.username_index.remove(&old_username);
            tables.username_index.insert(user.username.clone(), user.id);
        }
        if user.email != old_email {
            if let Some(owner) = tables.email_index.get(&user.email) {
                if *owner != user.id {
                    return Err(StoreError::Conflict { field: "email" });
                }
            }
            tables.email_index.remove(&old_email);
            tables.email_index.insert(user.email.clone(), user.id);
        }

        tables.users.insert(user.id, user);
        Ok(true)
    }

    async fn put_users(&self, users: Vec<User>) -> StoreResult<()> {
        let mut tables = self.write()?;
        for user in users {
            tables.users.insert(user.id, user);
        }
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.write()?;
        match tables.users.remove(&id) {
            Some(user) => {
                tables.username_index.remove(&user.username);
                tables.email_index.remove(&user.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn resolve_users(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, User>> {
        Ok(resolve_from(&self.read()?.users, ids))
    }

    async fn insert_post(&self, post: Post) -> StoreResult<()> {
        self.write()?.posts.insert(post.id, post);
        Ok(())
    }

    async fn get_post(&self, id: Uuid) -> StoreResult<Option<Post>> {
        Ok(self.read()?.posts.get(&id).cloned())
    }

    async fn put_post(&self, post: Post) -> StoreResult<bool> {
        let mut tables = self.write()?;
        if !tables.posts.contains_key(&post.id) {
            return Ok(false);
        }
        tables.posts.insert(post.id, post);
        Ok(true)
    }

    async fn delete_post(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.write()?.posts.remove(&id).is_some())
    }

    async fn resolve_posts(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Post>> {
        Ok(resolve_from(&self.read()?.posts, ids))
    }

    async fn recent_posts(&self, limit: usize, offset: usize) -> StoreResult<Vec<Post>> {
        let tables = self.read()?;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        posts.sort_by(recency_order);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_posts(&self) -> StoreResult<usize> {
        Ok(self.read()?.posts.len())
    }

    async fn posts_by_author(
        &self,
        author: Uuid,
        limit: usize,
        offset: usize,
    ) -> StoreResult<Vec<Post>> {
        let tables = self.read()?;
        let mut posts: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| post.author == author)
            .cloned()
            .collect();
        posts.sort_by(recency_order);
        Ok(posts.into_iter().skip(offset).take(limit).collect())
    }

    async fn count_posts_by_author(&self, author: Uuid) -> StoreResult<usize> {
        let tables = self.read()?;
        Ok(tables
            .posts
            .values()
            .filter(|post| post.author == author)
            .count())
    }

    async fn insert_tag(&self, tag: Tag) -> StoreResult<()> {
        let mut tables = self.write()?;
        if tables.tag_name_index.contains_key(&tag.name) {
            return Err(StoreError::Conflict { field: "tag name" });
        }
        tables.tag_name_index.insert(tag.name.clone(), tag.id);
        tables.tags.insert(tag.id, tag);
        Ok(())
    }

    async fn get_tag(&self, id: Uuid) -> StoreResult<Option<Tag>> {
        Ok(self.read()?.tags.get(&id).cloned())
    }

    async fn get_tag_by_name(&self, name: &str) -> StoreResult<Option<Tag>> {
        let tables = self.read()?;
        Ok(tables
            .tag_name_index
            .get(name)
            .and_then(|id| tables.tags.get(id))
            .cloned())
    }

    async fn put_tag(&self, tag: Tag) -> StoreResult<bool> {
        let mut tables = self.write()?;
        if !tables.tags.contains_key(&tag.id) {
            return Ok(false);
        }
        tables.tags.insert(tag.id, tag);
        Ok(true)
    }

    async fn resolve_tags(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Tag>> {
        Ok(resolve_from(&self.read()?.tags, ids))
    }

    async fn insert_comment(&self, comment: Comment) -> StoreResult<()> {
        self.write()?.comments.insert(comment.id, comment);
        Ok(())
    }

    async fn get_comment(&self, id: Uuid) -> StoreResult<Option<Comment>> {
        Ok(self.read()?.comments.get(&id).cloned())
    }

    async fn delete_comment(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.write()?.comments.remove(&id).is_some())
    }

    async fn resolve_comments(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, Comment>> {
        Ok(resolve_from(&self.read()?.comments, ids))
    }

    async fn search_posts(&self, needle: &str, cap: usize) -> StoreResult<Vec<Post>> {
        let tables = self.read()?;
        let mut hits: Vec<Post> = tables
            .posts
            .values()
            .filter(|post| {
                post.content
                    .searchable_text()
                    .to_lowercase()
                    .contains(needle)
            })
            .cloned()
            .collect();
        hits.sort_by(recency_order);
        hits.truncate(cap);
        Ok(hits)
    }

    async fn search_users(&self, needle: &str, cap: usize) -> StoreResult<Vec<User>> {
        let tables = self.read()?;
        let mut hits: Vec<User> = tables
            .users
            .values()
            .filter(|user| {
                user.username.to_lowercase().contains(needle)
                    || user.full_name.to_lowercase().contains(needle)
            })
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.username.cmp(&b.username));
        hits.truncate(cap);
        Ok(hits)
    }

    async fn search_tags(&self, needle: &str, cap: usize) -> StoreResult<Vec<Tag>> {
        let tables = self.read()?;
        let mut hits: Vec<Tag> = tables
            .tags
            .values()
            .filter(|tag| tag.name.contains(needle))
            .cloned()
            .collect();
        hits.sort_by(|a, b| a.name.cmp(&b.name));
        hits.truncate(cap);
        Ok(hits)
    }
}
