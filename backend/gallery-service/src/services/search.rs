//! Best-effort containment search over posts, users and tags.
//!
//! Case-insensitive substring match with a fixed cap per category; no
//! relevance scoring.

use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::SearchConfig;
use crate::domain::{PostSummary, UserSummary};
use crate::error::{AppError, Result};
use crate::store::EntityStore;

use super::projection::summarize_posts;

#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn EntityStore>,
    config: SearchConfig,
}

/// Category filter for a search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    Posts,
    Users,
    Tags,
    All,
}

impl SearchScope {
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        match raw.unwrap_or("all") {
            "posts" => Some(SearchScope::Posts),
            "users" => Some(SearchScope::Users),
            "tags" => Some(SearchScope::Tags),
            "all" => Some(SearchScope::All),
            _ => None,
        }
    }

    fn covers_posts(self) -> bool {
        matches!(self, SearchScope::Posts | SearchScope::All)
    }

    fn covers_users(self) -> bool {
        matches!(self, SearchScope::Users | SearchScope::All)
    }

    fn covers_tags(self) -> bool {
        matches!(self, SearchScope::Tags | SearchScope::All)
    }
}

/// Tag hit: name plus how many posts carry it
#[derive(Debug, Clone, Serialize)]
pub struct TagHit {
    pub id: Uuid,
    pub name: String,
    pub posts_count: usize,
}

/// Per-category results; categories outside the scope are omitted
#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<Vec<PostSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<UserSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<TagHit>>,
}

impl SearchService {
    pub fn new(store: Arc<dyn EntityStore>, config: SearchConfig) -> Self {
        Self { store, config }
    }

    pub async fn search(&self, query: &str, scope: SearchScope) -> Result<SearchResults> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Err(AppError::ValidationError("search query required".to_string()));
        }

        let mut results = SearchResults {
            posts: None,
            users: None,
            tags: None,
        };

        if scope.covers_posts() {
            let posts = self.store.search_posts(&needle, self.config.post_cap).await?;
            results.posts = Some(summarize_posts(self.store.as_ref(), &posts).await?);
        }

        if scope.covers_users() {
            let users = self.store.search_users(&needle, self.config.user_cap).await?;
            results.users = Some(users.iter().map(UserSummary::from).collect());
        }

        if scope.covers_tags() {
            let tags = self.store.search_tags(&needle, self.config.tag_cap).await?;
            results.tags = Some(
                tags.into_iter()
                    .map(|tag| TagHit {
                        id: tag.id,
                        name: tag.name,
                        posts_count: tag.posts.len(),
                    })
                    .collect(),
            );
        }

        Ok(results)
    }
}
