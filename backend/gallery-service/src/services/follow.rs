//! Follow toggle: the symmetric relationship across two independently
//! stored user records.
//!
//! Invariant: B appears in A's followers exactly when A appears in B's
//! following. No single record embodies it, so the toggle re-reads both
//! records immediately before mutating and persists them through the
//! store's multi-record write. The initiating user is ordered first in
//! that write.

use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::store::EntityStore;

#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn EntityStore>,
}

/// Outcome of a follow toggle: the new edge state and the target's
/// updated follower count
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FollowToggle {
    pub following: bool,
    pub followers_count: usize,
}

impl FollowService {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Toggle the follow edge from `actor` to `target`.
    ///
    /// A single toggle verb instead of follow/unfollow pairs: membership is
    /// decided from the freshly read record, so racing double-invocations
    /// converge instead of double-inserting or double-removing.
    pub async fn toggle_follow(&self, actor: Uuid, target: Uuid) -> Result<FollowToggle> {
        if actor == target {
            return Err(AppError::InvalidOperation(
                "cannot follow yourself".to_string(),
            ));
        }

        let records = self.store.resolve_users(&[actor, target]).await?;
        let mut actor_user = records
            .get(&actor)
            .cloned()
            .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;
        let mut target_user = records
            .get(&target)
            .cloned()
            .ok_or_else(|| AppError::NotFound("target user not found".to_string()))?;

        let following = !actor_user.following.contains(&target);
        if following {
            actor_user.following.insert(target);
            target_user.followers.insert(actor);
        } else {
            actor_user.following.remove(&target);
            target_user.followers.remove(&actor);
        }
        let followers_count = target_user.followers.len();

        self.store
            .put_users(vec![actor_user, target_user])
            .await?;

        info!(actor = %actor, target = %target, following, "follow toggled");

        Ok(FollowToggle {
            following,
            followers_count,
        })
    }
}
