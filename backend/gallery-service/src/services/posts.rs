//! Post lifecycle: creation (with tag attachment and the author
//! back-reference) and author-only deletion with linkage pruning.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{Post, PostContent, PostSummary};
use crate::error::{AppError, Result};
use crate::store::EntityStore;

use super::projection::summarize_posts;
use super::TagService;

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn EntityStore>,
    tags: TagService,
}

impl PostService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        let tags = TagService::new(store.clone());
        Self { store, tags }
    }

    /// Create a post, attach any tags from `tag_string`, and record the
    /// authorship back-reference on the user. Returns the populated summary.
    pub async fn create_post(
        &self,
        author_id: Uuid,
        content: PostContent,
        tag_string: Option<&str>,
    ) -> Result<PostSummary> {
        validate_content(&content)?;

        if self.store.get_user(author_id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let post = Post::new(author_id, content);
        let post_id = post.id;
        self.store.insert_post(post).await?;

        if let Some(raw) = tag_string {
            if !raw.trim().is_empty() {
                self.tags.attach_tags(post_id, raw).await?;
            }
        }

        // Authorship back-reference; re-read the user record before the
        // conditional write.
        let mut author = self
            .store
            .get_user(author_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        if !author.posts.contains(&post_id) {
            author.posts.push(post_id);
            self.store.put_user(author).await?;
        }

        info!(post = %post_id, author = %author_id, "post created");

        self.summary(post_id).await
    }

    /// Delete a post. Only the author may delete; moderation flows go
    /// through a separate surface.
    pub async fn delete_post(&self, post_id: Uuid, actor: Uuid) -> Result<()> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        if post.author != actor {
            return Err(AppError::InvalidOperation(
                "only the author may delete a post".to_string(),
            ));
        }

        // Prune linkage before dropping the record: tag membership,
        // authorship back-reference, then the owned comment records.
        let tags = self.store.resolve_tags(&post.tags).await?;
        for (_, mut tag) in tags {
            tag.posts.retain(|id| *id != post_id);
            self.store.put_tag(tag).await?;
        }

        if let Some(mut author) = self.store.get_user(post.author).await? {
            author.posts.retain(|id| *id != post_id);
            self.store.put_user(author).await?;
        }

        for comment_id in &post.comments {
            self.store.delete_comment(*comment_id).await?;
        }

        self.store.delete_post(post_id).await?;

        info!(post = %post_id, actor = %actor, "post deleted");

        Ok(())
    }

    async fn summary(&self, post_id: Uuid) -> Result<PostSummary> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;
        let mut summaries = summarize_posts(self.store.as_ref(), std::slice::from_ref(&post)).await?;
        // The author was resolved moments ago; a projection miss here is a
        // store inconsistency, not a caller error.
        summaries
            .pop()
            .ok_or_else(|| AppError::Internal("post author missing from projection".to_string()))
    }
}

fn validate_content(content: &PostContent) -> Result<()> {
    match content {
        PostContent::Text { body, .. } if body.trim().is_empty() => Err(AppError::ValidationError(
            "text post requires a body".to_string(),
        )),
        PostContent::Image { image_url, .. } if image_url.trim().is_empty() => Err(
            AppError::ValidationError("image post requires an image locator".to_string()),
        ),
        _ => Ok(()),
    }
}
