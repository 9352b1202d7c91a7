//! Integration tests: tag attachment, comments, and post lifecycle
//! linkage.
//!
//! Coverage:
//! - Tag normalization and idempotent attach
//! - Upsert-on-write tag creation (no duplicate names)
//! - Comment validation and append order
//! - Delete pruning of tag membership and authorship back-references

mod common;

use common::{register_user, stack, text_post};
use gallery_service::error::AppError;

#[tokio::test]
async fn create_with_messy_tag_string_yields_one_tag() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;

    let summary = stack
        .posts
        .create_post(alice.id, text_post("trees"), Some("Nature, nature, "))
        .await
        .unwrap();

    assert_eq!(summary.tags, vec!["nature".to_string()]);

    let tag = stack
        .store
        .get_tag_by_name("nature")
        .await
        .unwrap()
        .expect("tag should exist");
    assert_eq!(tag.posts, vec![summary.id]);
}

#[tokio::test]
async fn attach_tags_is_idempotent() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let post = stack
        .posts
        .create_post(alice.id, text_post("paint"), None)
        .await
        .unwrap();

    stack
        .tags
        .attach_tags(post.id, "Art, art , ART")
        .await
        .unwrap();
    stack.tags.attach_tags(post.id, "art").await.unwrap();

    let tag = stack
        .store
        .get_tag_by_name("art")
        .await
        .unwrap()
        .expect("tag should exist");
    assert_eq!(tag.posts, vec![post.id]);

    let record = stack.store.get_post(post.id).await.unwrap().unwrap();
    assert_eq!(record.tags, vec![tag.id]);
}

#[tokio::test]
async fn shared_tag_links_every_post_once() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let first = stack
        .posts
        .create_post(alice.id, text_post("one"), Some("shared"))
        .await
        .unwrap();
    let second = stack
        .posts
        .create_post(alice.id, text_post("two"), Some("Shared"))
        .await
        .unwrap();

    let tag = stack
        .store
        .get_tag_by_name("shared")
        .await
        .unwrap()
        .expect("tag should exist");
    assert_eq!(tag.posts, vec![first.id, second.id]);
}

#[tokio::test]
async fn reattach_releases_membership_of_dropped_tags() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let post = stack
        .posts
        .create_post(alice.id, text_post("shift"), Some("first"))
        .await
        .unwrap();

    stack.tags.attach_tags(post.id, "second").await.unwrap();

    let first = stack
        .store
        .get_tag_by_name("first")
        .await
        .unwrap()
        .expect("dropped tag record survives");
    assert!(first.posts.is_empty());

    let second = stack
        .store
        .get_tag_by_name("second")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.posts, vec![post.id]);

    let record = stack.store.get_post(post.id).await.unwrap().unwrap();
    assert_eq!(record.tags, vec![second.id]);
}

#[tokio::test]
async fn empty_comment_is_rejected() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let post = stack
        .posts
        .create_post(alice.id, text_post("hello"), None)
        .await
        .unwrap();

    let err = stack
        .comments
        .add_comment(post.id, alice.id, "   ")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn comments_keep_creation_order() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let bob = register_user(&stack, "bob").await;
    let post = stack
        .posts
        .create_post(alice.id, text_post("hello"), None)
        .await
        .unwrap();

    let first = stack
        .comments
        .add_comment(post.id, bob.id, "first")
        .await
        .unwrap();
    let second = stack
        .comments
        .add_comment(post.id, alice.id, "second")
        .await
        .unwrap();
    let third = stack
        .comments
        .add_comment(post.id, bob.id, "third")
        .await
        .unwrap();

    let detail = stack.feed.post_detail(post.id).await.unwrap();
    let ids: Vec<_> = detail.comments.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
    assert_eq!(detail.comments[0].text, "first");
    assert_eq!(detail.comments[0].author.username, "bob");
    assert_eq!(detail.summary.comments_count, 3);
}

#[tokio::test]
async fn comment_text_is_trimmed() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let post = stack
        .posts
        .create_post(alice.id, text_post("hello"), None)
        .await
        .unwrap();

    let view = stack
        .comments
        .add_comment(post.id, alice.id, "  nice shot  ")
        .await
        .unwrap();
    assert_eq!(view.text, "nice shot");
}

#[tokio::test]
async fn delete_prunes_tag_membership_and_author_reference() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let post = stack
        .posts
        .create_post(alice.id, text_post("bye"), Some("fleeting"))
        .await
        .unwrap();
    stack
        .comments
        .add_comment(post.id, alice.id, "gone soon")
        .await
        .unwrap();

    stack.posts.delete_post(post.id, alice.id).await.unwrap();

    assert!(stack.store.get_post(post.id).await.unwrap().is_none());
    let tag = stack
        .store
        .get_tag_by_name("fleeting")
        .await
        .unwrap()
        .expect("tag record survives post deletion");
    assert!(tag.posts.is_empty());
    let author = stack.store.get_user(alice.id).await.unwrap().unwrap();
    assert!(!author.posts.contains(&post.id));
}

#[tokio::test]
async fn delete_by_non_author_is_rejected() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let bob = register_user(&stack, "bob").await;
    let post = stack
        .posts
        .create_post(alice.id, text_post("mine"), None)
        .await
        .unwrap();

    let err = stack.posts.delete_post(post.id, bob.id).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidOperation(_)));
    assert!(stack.store.get_post(post.id).await.unwrap().is_some());
}

#[tokio::test]
async fn text_post_requires_a_body() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;

    let err = stack
        .posts
        .create_post(alice.id, text_post("   "), None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn duplicate_username_conflicts() {
    let stack = stack();
    register_user(&stack, "alice").await;

    let err = stack
        .users
        .register("alice", "second@example.com", "Other Alice", None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}
