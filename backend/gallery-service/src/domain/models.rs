//! Durable entity records owned by the entity store.
//!
//! These are the raw internal shapes; API callers only ever see the read
//! models in [`super::projections`]. Relationship sets live directly on the
//! records: `User.followers`/`User.following` are mutually owned by the pair
//! of users involved, `Post.likes`/`Post.comments` are owned exclusively by
//! the post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// User entity - identity plus the follow graph edges incident to it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Unique handle
    pub username: String,
    /// Unique, stored lowercased
    pub email: String,
    pub full_name: String,
    /// Avatar locator resolved by the blob store collaborator
    pub avatar: String,
    /// Authored posts, in creation order
    pub posts: Vec<Uuid>,
    pub followers: HashSet<Uuid>,
    pub following: HashSet<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: String, full_name: String, avatar: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username,
            email: email.to_lowercase(),
            full_name,
            avatar: avatar.unwrap_or_else(|| "default-avatar.png".to_string()),
            posts: Vec::new(),
            followers: HashSet::new(),
            following: HashSet::new(),
            created_at: Utc::now(),
        }
    }
}

/// Post payload, discriminated by kind. Text posts carry an optional title
/// and a body; image posts carry a blob locator and an optional caption.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PostContent {
    Text {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        body: String,
    },
    Image {
        image_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
    },
}

impl PostContent {
    pub fn kind(&self) -> &'static str {
        match self {
            PostContent::Text { .. } => "text",
            PostContent::Image { .. } => "image",
        }
    }

    /// Free text searched by the search adapter: title + body for text
    /// posts, caption for image posts.
    pub fn searchable_text(&self) -> String {
        match self {
            PostContent::Text { title, body } => match title {
                Some(t) => format!("{} {}", t, body),
                None => body.clone(),
            },
            PostContent::Image { caption, .. } => caption.clone().unwrap_or_default(),
        }
    }
}

/// Post entity - authored content plus the like/tag/comment linkage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    /// Immutable after creation
    pub author: Uuid,
    #[serde(flatten)]
    pub content: PostContent,
    /// Resolved tag references, in attach order
    pub tags: Vec<Uuid>,
    /// Users who liked this post; unordered, O(1) membership
    pub likes: HashSet<Uuid>,
    /// Comment references, append-only, creation order
    pub comments: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(author: Uuid, content: PostContent) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            content,
            tags: Vec::new(),
            likes: HashSet::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Tag entity - canonical lowercase name plus its post membership set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: Uuid,
    /// Unique canonical lowercase name
    pub name: String,
    /// Posts carrying this tag, in insertion order
    pub posts: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            posts: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Comment entity - owned by its parent post's comment sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: Uuid,
    /// Immutable parent reference
    pub post_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author: Uuid, post_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            post_id,
            text,
            created_at: Utc::now(),
        }
    }
}
