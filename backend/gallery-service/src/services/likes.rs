//! Like toggle on a post's membership set. Single-record mutation; the
//! membership is re-read from the store immediately before the write so
//! concurrent toggles converge on a boolean instead of drifting a counter.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::store::EntityStore;

#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn EntityStore>,
}

/// Outcome of a like toggle
#[derive(Debug, Clone, Copy, Serialize)]
pub struct LikeToggle {
    pub liked: bool,
    pub likes_count: usize,
}

impl LikeService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<LikeToggle> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let mut post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let liked = post.likes.insert(user_id);
        if !liked {
            post.likes.remove(&user_id);
        }
        let likes_count = post.likes.len();

        if !self.store.put_post(post).await? {
            // Post vanished between read and write
            return Err(AppError::NotFound("post not found".to_string()));
        }

        info!(post = %post_id, user = %user_id, liked, "like toggled");

        Ok(LikeToggle { liked, likes_count })
    }
}
