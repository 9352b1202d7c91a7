//! Tag attachment: lazy upsert-or-create keyed by the canonical lowercase
//! name, then bidirectional linkage between tag and post.
//!
//! Upsert discipline: attempt the create, and on a uniqueness conflict
//! fall back to fetch-by-name; the losing writer of a race adopts the
//! winner's record instead of erroring. The whole operation is idempotent.

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::Tag;
use crate::error::{AppError, Result};
use crate::store::{EntityStore, StoreError};

#[derive(Clone)]
pub struct TagService {
    store: Arc<dyn EntityStore>,
}

/// Split on comma, trim, lowercase, drop empties, de-duplicate preserving
/// first occurrence.
pub fn normalize_tag_names(raw: &str) -> Vec<String> {
    let mut names = Vec::new();
    for piece in raw.split(',') {
        let name = piece.trim().to_lowercase();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

impl TagService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Attach the tags named in `raw` to `post_id`, creating missing tags,
    /// and set the post's tag list to the resolved references. Tags dropped
    /// by the replacement release their membership so both sides of the
    /// linkage stay in step. Returns the canonical tag names in attach order.
    pub async fn attach_tags(&self, post_id: Uuid, raw: &str) -> Result<Vec<String>> {
        if self.store.get_post(post_id).await?.is_none() {
            return Err(AppError::NotFound("post not found".to_string()));
        }

        let names = normalize_tag_names(raw);
        let mut tag_ids = Vec::with_capacity(names.len());

        for name in &names {
            let mut tag = self.upsert_tag(name).await?;
            if !tag.posts.contains(&post_id) {
                tag.posts.push(post_id);
                self.store.put_tag(tag.clone()).await?;
            }
            tag_ids.push(tag.id);
        }

        // Re-read the post right before the write; the record may have
        // moved while tags were being upserted.
        let mut post = self
            .store
            .get_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("post not found".to_string()))?;
        if post.tags != tag_ids {
            // Tags no longer referenced must stop claiming the post, or the
            // tag feed keeps serving it after the post dropped the tag.
            let removed: Vec<Uuid> = post
                .tags
                .iter()
                .copied()
                .filter(|id| !tag_ids.contains(id))
                .collect();
            let stale = self.store.resolve_tags(&removed).await?;
            for (_, mut tag) in stale {
                tag.posts.retain(|id| *id != post_id);
                self.store.put_tag(tag).await?;
            }

            post.tags = tag_ids;
            if !self.store.put_post(post).await? {
                return Err(AppError::NotFound("post not found".to_string()));
            }
        }

        info!(post = %post_id, tags = ?names, "tags attached");

        Ok(names)
    }

    async fn upsert_tag(&self, name: &str) -> Result<Tag> {
        let tag = Tag::new(name.to_string());
        match self.store.insert_tag(tag.clone()).await {
            Ok(()) => Ok(tag),
            Err(StoreError::Conflict { .. }) => self
                .store
                .get_tag_by_name(name)
                .await?
                .ok_or_else(|| {
                    AppError::Transient(format!("tag {} lost between create and fetch", name))
                }),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_trims_lowercases_and_dedupes() {
        assert_eq!(
            normalize_tag_names("Art, art , ART"),
            vec!["art".to_string()]
        );
        assert_eq!(
            normalize_tag_names("Nature, nature, "),
            vec!["nature".to_string()]
        );
        assert_eq!(
            normalize_tag_names(" Sunset ,beach,  SUNSET"),
            vec!["sunset".to_string(), "beach".to_string()]
        );
        assert!(normalize_tag_names("  , ,").is_empty());
    }
}
