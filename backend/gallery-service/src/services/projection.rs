//! Shared post projection: batch-resolves authors and tags so a page of
//! posts costs two store round trips instead of N sequential fetches.

use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::{Post, PostSummary, UserSummary};
use crate::error::Result;
use crate::store::EntityStore;

pub(crate) async fn summarize_posts(
    store: &dyn EntityStore,
    posts: &[Post],
) -> Result<Vec<PostSummary>> {
    let author_ids: Vec<Uuid> = posts
        .iter()
        .map(|post| post.author)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    let tag_ids: Vec<Uuid> = posts
        .iter()
        .flat_map(|post| post.tags.iter().copied())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let authors = store.resolve_users(&author_ids).await?;
    let tags = store.resolve_tags(&tag_ids).await?;

    // A post whose author no longer resolves is dropped from the view
    // rather than failing the whole page.
    Ok(posts
        .iter()
        .filter_map(|post| {
            let author = authors.get(&post.author).map(UserSummary::from)?;
            let tag_names = post
                .tags
                .iter()
                .filter_map(|id| tags.get(id).map(|tag| tag.name.clone()))
                .collect();
            Some(PostSummary::project(post, author, tag_names))
        })
        .collect())
}
