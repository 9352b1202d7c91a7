//! Shared fixtures for integration tests: an in-memory store wired to the
//! full service stack, plus helpers for seeding users and posts.
#![allow(dead_code)]

use std::sync::Arc;

use gallery_service::config::{FeedConfig, SearchConfig};
use gallery_service::domain::{PostContent, UserProfile};
use gallery_service::services::{
    CommentService, FeedService, FollowService, LikeService, PostService, SearchService,
    TagService, UserService,
};
use gallery_service::store::{EntityStore, MemoryStore};

pub struct TestStack {
    pub store: Arc<dyn EntityStore>,
    pub users: UserService,
    pub follows: FollowService,
    pub likes: LikeService,
    pub comments: CommentService,
    pub posts: PostService,
    pub tags: TagService,
    pub feed: FeedService,
    pub search: SearchService,
}

pub fn stack() -> TestStack {
    let store: Arc<dyn EntityStore> = Arc::new(MemoryStore::new());
    TestStack {
        users: UserService::new(store.clone()),
        follows: FollowService::new(store.clone()),
        likes: LikeService::new(store.clone()),
        comments: CommentService::new(store.clone()),
        posts: PostService::new(store.clone()),
        tags: TagService::new(store.clone()),
        feed: FeedService::new(store.clone(), FeedConfig::default()),
        search: SearchService::new(store.clone(), SearchConfig::default()),
        store,
    }
}

pub async fn register_user(stack: &TestStack, username: &str) -> UserProfile {
    stack
        .users
        .register(
            username,
            &format!("{}@example.com", username),
            &format!("{} Example", username),
            None,
        )
        .await
        .expect("user registration failed")
}

pub fn text_post(body: &str) -> PostContent {
    PostContent::Text {
        title: None,
        body: body.to_string(),
    }
}

pub fn image_post(url: &str, caption: Option<&str>) -> PostContent {
    PostContent::Image {
        image_url: url.to_string(),
        caption: caption.map(str::to_string),
    }
}
