//! Comment creation: append-only sequence on the parent post, creation
//! order, never reordered.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Comment, CommentView, UserSummary};
use crate::error::{AppError, Result};
use crate::store::EntityStore;

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn EntityStore>,
}

impl CommentService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Create a comment and append its reference to the post's sequence.
    /// Returns the created comment with its author projected.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        text: &str,
    ) -> Result<CommentView> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "comment text is required".to_string(),
            ));
        }

        let author = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        let mut post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let comment = Comment::new(user_id, post_id, text.to_string());
        self.store.insert_comment(comment.clone()).await?;

        post.comments.push(comment.id);
        if !self.store.put_post(post).await? {
            // Post vanished after the comment record was created; drop the
            // orphan so a retry starts clean.
            self.store.delete_comment(comment.id).await?;
            return Err(AppError::NotFound("post not found".to_string()));
        }

        info!(post = %post_id, comment = %comment.id, "comment added");

        Ok(CommentView::project(&comment, UserSummary::from(&author)))
    }
}
