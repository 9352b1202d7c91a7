//! Integration tests: feed assembly and pagination.
//!
//! Coverage:
//! - Global feed ordering (newest first) and projection shape
//! - Pagination stability: 25 posts, limit 10 -> pages of 10/10/5
//! - Limit clamping and page floor
//! - User feed and tag feed views

mod common;

use chrono::{Duration, Utc};
use common::{image_post, register_user, stack, text_post, TestStack};
use gallery_service::domain::{Post, PostContent};
use gallery_service::error::AppError;
use uuid::Uuid;

/// Seed `count` posts with strictly decreasing ages so ordering
/// assertions are deterministic. Returns ids oldest first.
async fn seed_posts(stack: &TestStack, author: Uuid, count: usize) -> Vec<Uuid> {
    let base = Utc::now();
    let mut ids = Vec::with_capacity(count);
    for i in 0..count {
        let mut post = Post::new(
            author,
            PostContent::Text {
                title: None,
                body: format!("post {}", i + 1),
            },
        );
        post.created_at = base - Duration::seconds((count - i) as i64);
        ids.push(post.id);
        stack.store.insert_post(post).await.unwrap();
    }
    ids
}

#[tokio::test]
async fn global_feed_is_newest_first_with_projection() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let ids = seed_posts(&stack, alice.id, 3).await;

    let page = stack.feed.global_feed(None, None).await.unwrap();
    let got: Vec<Uuid> = page.posts.iter().map(|p| p.id).collect();
    let expected: Vec<Uuid> = ids.into_iter().rev().collect();
    assert_eq!(got, expected);

    let first = &page.posts[0];
    assert_eq!(first.author.username, "alice");
    assert_eq!(first.likes_count, 0);
    assert!(first.tags.is_empty());
}

#[tokio::test]
async fn pagination_is_stable_across_pages() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    seed_posts(&stack, alice.id, 25).await;

    let page1 = stack.feed.global_feed(Some(1), Some(10)).await.unwrap();
    let page2 = stack.feed.global_feed(Some(2), Some(10)).await.unwrap();
    let page3 = stack.feed.global_feed(Some(3), Some(10)).await.unwrap();

    assert_eq!(page1.posts.len(), 10);
    assert_eq!(page2.posts.len(), 10);
    assert_eq!(page3.posts.len(), 5);
    assert_eq!(page1.pagination.total, 25);
    assert_eq!(page1.pagination.pages, 3);

    // No overlap, full coverage
    let mut seen: Vec<Uuid> = page1
        .posts
        .iter()
        .chain(page2.posts.iter())
        .chain(page3.posts.iter())
        .map(|p| p.id)
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 25);

    let page4 = stack.feed.global_feed(Some(4), Some(10)).await.unwrap();
    assert!(page4.posts.is_empty());
}

#[tokio::test]
async fn limit_is_clamped_and_page_floored() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    seed_posts(&stack, alice.id, 120).await;

    let page = stack.feed.global_feed(Some(0), Some(500)).await.unwrap();
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, 100);
    assert_eq!(page.posts.len(), 100);
}

#[tokio::test]
async fn user_feed_only_contains_that_author() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    let bob = register_user(&stack, "bob").await;
    seed_posts(&stack, alice.id, 3).await;
    seed_posts(&stack, bob.id, 2).await;

    let page = stack.feed.user_feed(bob.id, None, None).await.unwrap();
    assert_eq!(page.pagination.total, 2);
    assert!(page.posts.iter().all(|p| p.author.id == bob.id));
}

#[tokio::test]
async fn user_feed_for_unknown_user_is_not_found() {
    let stack = stack();
    let err = stack
        .feed
        .user_feed(Uuid::new_v4(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn tag_feed_resolves_normalized_name() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    stack
        .posts
        .create_post(alice.id, image_post("shots/1.jpg", Some("dawn")), Some("sunrise"))
        .await
        .unwrap();
    stack
        .posts
        .create_post(alice.id, text_post("words"), Some("sunrise, words"))
        .await
        .unwrap();

    let page = stack.feed.tag_feed(" SunRise ", None, None).await.unwrap();
    assert_eq!(page.pagination.total, 2);
    assert!(page
        .posts
        .iter()
        .all(|p| p.tags.contains(&"sunrise".to_string())));
}

#[tokio::test]
async fn tag_feed_for_unknown_tag_is_not_found() {
    let stack = stack();
    let err = stack
        .feed
        .tag_feed("nowhere", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn post_detail_for_unknown_post_is_not_found() {
    let stack = stack();
    let err = stack.feed.post_detail(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn profile_populates_authored_posts() {
    let stack = stack();
    let alice = register_user(&stack, "alice").await;
    stack
        .posts
        .create_post(alice.id, text_post("hello"), None)
        .await
        .unwrap();

    let profile = stack.users.profile(alice.id).await.unwrap();
    assert_eq!(profile.posts.len(), 1);
    assert_eq!(profile.followers_count, 0);
}
