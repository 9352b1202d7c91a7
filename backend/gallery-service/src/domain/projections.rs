//! Read models exposed to API callers.
//!
//! Projections are bounded summary shapes; internal-only fields (raw
//! reference sets, unique-index keys) never leave the core through them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::models::{Comment, Post, PostContent, User};

/// Bounded user shape embedded in post and comment views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub avatar: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

/// Profile view: summary plus counts and authored posts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: String,
    pub followers_count: usize,
    pub following_count: usize,
    /// Whether the viewing user follows this profile; absent on one's own
    /// profile or when no viewer is known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_following: Option<bool>,
    pub posts: Vec<PostSummary>,
}

/// Post summary: author and tag names projected, counts instead of sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub author: UserSummary,
    #[serde(flatten)]
    pub content: PostContent,
    pub tags: Vec<String>,
    pub likes_count: usize,
    pub comments_count: usize,
    pub created_at: DateTime<Utc>,
}

impl PostSummary {
    pub fn project(post: &Post, author: UserSummary, tags: Vec<String>) -> Self {
        Self {
            id: post.id,
            author,
            content: post.content.clone(),
            tags,
            likes_count: post.likes.len(),
            comments_count: post.comments.len(),
            created_at: post.created_at,
        }
    }
}

/// Single comment with its author projected
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub author: UserSummary,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl CommentView {
    pub fn project(comment: &Comment, author: UserSummary) -> Self {
        Self {
            id: comment.id,
            author,
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}

/// Full single-post view: summary plus the ordered comment sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,
    pub comments: Vec<CommentView>,
}

/// Pagination envelope shared by all feed views
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub pages: usize,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: usize) -> Self {
        let pages = if total == 0 {
            0
        } else {
            total.div_ceil(limit as usize)
        };
        Self {
            page,
            limit,
            total,
            pages,
        }
    }
}
