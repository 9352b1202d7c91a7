//! User profile registration and retrieval. Credentials never pass through
//! here; the identity provider collaborator authenticates and hands the
//! core a resolved actor id per call.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{User, UserProfile, UserSummary};
use crate::error::{AppError, Result};
use crate::store::EntityStore;

use super::projection::summarize_posts;

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn EntityStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        full_name: &str,
        avatar: Option<String>,
    ) -> Result<UserProfile> {
        let username = username.trim();
        let email = email.trim();
        let full_name = full_name.trim();
        if username.is_empty() || email.is_empty() || full_name.is_empty() {
            return Err(AppError::ValidationError(
                "username, email and full name are required".to_string(),
            ));
        }

        let user = User::new(
            username.to_string(),
            email.to_string(),
            full_name.to_string(),
            avatar,
        );
        let id = user.id;
        self.store.insert_user(user).await?;

        info!(user = %id, username, "user registered");

        self.profile(id).await
    }

    /// Update the actor's own profile. Username is immutable; an email
    /// change is re-checked against the uniqueness index by the store.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        full_name: Option<&str>,
        email: Option<&str>,
        avatar: Option<String>,
    ) -> Result<UserProfile> {
        let mut user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        if let Some(full_name) = full_name {
            let full_name = full_name.trim();
            if full_name.is_empty() {
                return Err(AppError::ValidationError(
                    "full name cannot be empty".to_string(),
                ));
            }
            user.full_name = full_name.to_string();
        }
        if let Some(email) = email {
            let email = email.trim().to_lowercase();
            if email.is_empty() {
                return Err(AppError::ValidationError(
                    "email cannot be empty".to_string(),
                ));
            }
            user.email = email;
        }
        if let Some(avatar) = avatar {
            user.avatar = avatar;
        }

        if !self.store.put_user(user).await? {
            return Err(AppError::NotFound("user not found".to_string()));
        }

        info!(user = %user_id, "profile updated");

        self.profile(user_id).await
    }

    /// Profile view with authored posts populated, newest first.
    pub async fn profile(&self, user_id: Uuid) -> Result<UserProfile> {
        self.profile_for(user_id, None).await
    }

    /// Profile as seen by `viewer`; carries the viewer's follow state when
    /// the viewer is someone else.
    pub async fn profile_for(&self, user_id: Uuid, viewer: Option<Uuid>) -> Result<UserProfile> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

        let is_following = viewer
            .filter(|v| *v != user_id)
            .map(|v| user.followers.contains(&v));

        let posts = self
            .store
            .posts_by_author(user_id, user.posts.len(), 0)
            .await?;
        let posts = summarize_posts(self.store.as_ref(), &posts).await?;

        Ok(UserProfile {
            id: user.id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            avatar: user.avatar,
            followers_count: user.followers.len(),
            following_count: user.following.len(),
            is_following,
            posts,
        })
    }

    /// Users following this profile, username order.
    pub async fn followers(&self, user_id: Uuid) -> Result<Vec<UserSummary>> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        self.summarize(&user.followers).await
    }

    /// Users this profile follows, username order.
    pub async fn following(&self, user_id: Uuid) -> Result<Vec<UserSummary>> {
        let user = self
            .store
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        self.summarize(&user.following).await
    }

    async fn summarize(&self, ids: &HashSet<Uuid>) -> Result<Vec<UserSummary>> {
        let ids: Vec<Uuid> = ids.iter().copied().collect();
        let records = self.store.resolve_users(&ids).await?;
        let mut summaries: Vec<UserSummary> = records.values().map(UserSummary::from).collect();
        summaries.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(summaries)
    }
}
