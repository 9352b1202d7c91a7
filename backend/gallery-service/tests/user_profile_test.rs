//! Integration tests: user profiles.
//!
//! Coverage:
//! - Partial profile update, email normalization and uniqueness
//! - Viewer-relative follow state on the profile view
//! - Follower and following listings

mod common;

use common::{register_user, stack};
use gallery_service::error::AppError;
use uuid::Uuid;

#[tokio::test]
async fn update_changes_only_the_provided_fields() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;

    let profile = stack
        .users
        .update_profile(alice.id, Some("Alice Painter"), None, None)
        .await
        .unwrap();
    assert_eq!(profile.full_name, "Alice Painter");
    assert_eq!(profile.email, "alice@example.com");
    assert_eq!(profile.username, "alice");
}

#[tokio::test]
async fn updated_email_is_lowercased() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;

    let profile = stack
        .users
        .update_profile(alice.id, None, Some(" Alice@New.Example "), None)
        .await
        .unwrap();
    assert_eq!(profile.email, "alice@new.example");
}

#[tokio::test]
async fn email_change_to_taken_address_conflicts() {
    let stack = stack();
    register_user(&stack, "alice").await;
    let bob = register_user(&stack, "bob").await;

    let err = stack
        .users
        .update_profile(bob.id, None, Some("alice@example.com"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // The failed write left the record untouched
    let record = stack.store.get_user(bob.id).await.unwrap().unwrap();
    assert_eq!(record.email, "bob@example.com");
}

#[tokio::test]
async fn blank_full_name_is_rejected() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;

    let err = stack
        .users
        .update_profile(alice.id, Some("   "), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn profile_carries_viewer_follow_state() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let bob = register_user(&stack, "bob").await;
    stack.follows.toggle_follow(alice.id, bob.id).await.unwrap();

    let seen_by_alice = stack
        .users
        .profile_for(bob.id, Some(alice.id))
        .await
        .unwrap();
    assert_eq!(seen_by_alice.is_following, Some(true));

    let seen_by_bob = stack
        .users
        .profile_for(alice.id, Some(bob.id))
        .await
        .unwrap();
    assert_eq!(seen_by_bob.is_following, Some(false));

    // One's own profile and anonymous views carry no flag
    let own = stack.users.profile_for(bob.id, Some(bob.id)).await.unwrap();
    assert_eq!(own.is_following, None);
    let anonymous = stack.users.profile(bob.id).await.unwrap();
    assert_eq!(anonymous.is_following, None);
}

#[tokio::test]
async fn follower_and_following_listings_are_projected() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let bob = register_user(&stack, "bob").await;
    let carol = register_user(&stack, "carol").await;
    stack.follows.toggle_follow(bob.id, alice.id).await.unwrap();
    stack
        .follows
        .toggle_follow(carol.id, alice.id)
        .await
        .unwrap();
    stack.follows.toggle_follow(alice.id, bob.id).await.unwrap();

    let followers = stack.users.followers(alice.id).await.unwrap();
    let names: Vec<&str> = followers.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["bob", "carol"]);

    let following = stack.users.following(alice.id).await.unwrap();
    assert_eq!(following.len(), 1);
    assert_eq!(following[0].username, "bob");
}

#[tokio::test]
async fn listings_for_unknown_user_are_not_found() {
    let stack = stack();
    let err = stack.users.followers(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
