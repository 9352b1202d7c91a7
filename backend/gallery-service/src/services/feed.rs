//! Feed assembly: paginated, ordered post views with authors and tags
//! projected.
//!
//! Shared pagination contract: `page >= 1` (clamped), `limit` clamped to
//! the configured ceiling, `skip = (page - 1) * limit`. Ordering is
//! reverse-chronological with an id tiebreak, owned by the store.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::FeedConfig;
use crate::domain::{CommentView, Pagination, Post, PostDetail, PostSummary, UserSummary};
use crate::error::{AppError, Result};
use crate::store::EntityStore;

use super::projection::summarize_posts;
use super::tags::normalize_tag_names;

#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn EntityStore>,
    config: FeedConfig,
}

/// One page of a feed view
#[derive(Debug, Clone, Serialize)]
pub struct FeedPage {
    pub posts: Vec<PostSummary>,
    pub pagination: Pagination,
}

impl FeedService {
    pub fn new(store: Arc<dyn EntityStore>, config: FeedConfig) -> Self {
        Self { store, config }
    }

    fn page_window(&self, page: Option<u32>, limit: Option<u32>) -> (u32, u32, usize) {
        let page = page.unwrap_or(1).max(1);
        let limit = limit
            .unwrap_or(self.config.default_limit)
            .clamp(1, self.config.max_limit);
        let skip = (page as usize - 1) * limit as usize;
        (page, limit, skip)
    }

    /// All posts, newest first
    pub async fn global_feed(&self, page: Option<u32>, limit: Option<u32>) -> Result<FeedPage> {
        let (page, limit, skip) = self.page_window(page, limit);
        let total = self.store.count_posts().await?;
        let posts = self.store.recent_posts(limit as usize, skip).await?;
        let posts = summarize_posts(self.store.as_ref(), &posts).await?;

        Ok(FeedPage {
            posts,
            pagination: Pagination::new(page, limit, total),
        })
    }

    /// Posts authored by one user, newest first
    pub async fn user_feed(
        &self,
        user_id: Uuid,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<FeedPage> {
        if self.store.get_user(user_id).await?.is_none() {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        let (page, limit, skip) = self.page_window(page, limit);
        let total = self.store.count_posts_by_author(user_id).await?;
        let posts = self
            .store
            .posts_by_author(user_id, limit as usize, skip)
            .await?;
        let posts = summarize_posts(self.store.as_ref(), &posts).await?;

        Ok(FeedPage {
            posts,
            pagination: Pagination::new(page, limit, total),
        })
    }

    /// Posts carrying a tag, resolved by normalized name. The tag only
    /// stores a membership set, so ordering is applied at read time:
    /// newest first, matching the other feed views.
    pub async fn tag_feed(
        &self,
        tag_name: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<FeedPage> {
        let normalized = normalize_tag_names(tag_name)
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ValidationError("tag name is required".to_string()))?;

        let tag = self
            .store
            .get_tag_by_name(&normalized)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("tag {} not found", normalized)))?;

        let (page, limit, skip) = self.page_window(page, limit);
        let resolved = self.store.resolve_posts(&tag.posts).await?;
        let mut posts: Vec<Post> = tag
            .posts
            .iter()
            .filter_map(|id| resolved.get(id).cloned())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        let total = posts.len();
        let posts: Vec<Post> = posts.into_iter().skip(skip).take(limit as usize).collect();
        let posts = summarize_posts(self.store.as_ref(), &posts).await?;

        Ok(FeedPage {
            posts,
            pagination: Pagination::new(page, limit, total),
        })
    }

    /// Single-post view with the full comment sequence, append order
    pub async fn post_detail(&self, post_id: Uuid) -> Result<PostDetail> {
        let post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;

        let mut summaries = summarize_posts(self.store.as_ref(), std::slice::from_ref(&post)).await?;
        let summary = summaries
            .pop()
            .ok_or_else(|| AppError::NotFound("post author not found".to_string()))?;

        let comments = self.store.resolve_comments(&post.comments).await?;
        let author_ids: Vec<Uuid> = comments.values().map(|c| c.author).collect();
        let authors = self.store.resolve_users(&author_ids).await?;

        // Walk the post's reference sequence, not the resolved map, to
        // preserve creation order.
        let comments = post
            .comments
            .iter()
            .filter_map(|id| {
                let comment = comments.get(id)?;
                let author = authors.get(&comment.author).map(UserSummary::from)?;
                Some(CommentView::project(comment, author))
            })
            .collect();

        Ok(PostDetail { summary, comments })
    }
}
