/// Post handlers - creation, detail, deletion and the per-post
/// interactions (like, comment, tags)
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::PostContent;
use crate::error::Result;
use crate::middleware::UserId;
use crate::services::{CommentService, FeedService, LikeService, PostService, TagService};

use super::feed::FeedQueryParams;

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(flatten)]
    pub content: PostContent,
    /// Raw comma-separated tag string, normalized by the engine
    pub tags: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct AttachTagsRequest {
    pub tags: String,
}

/// Create a post authored by the actor
pub async fn create_post(
    posts: web::Data<PostService>,
    actor: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let summary = posts
        .create_post(actor.0, req.content.clone(), req.tags.as_deref())
        .await?;
    Ok(HttpResponse::Created().json(summary))
}

/// Single post with author, tags and the full comment sequence
pub async fn get_post(
    feed: web::Data<FeedService>,
    path: web::Path<Uuid>,
    _actor: UserId,
) -> Result<HttpResponse> {
    let detail = feed.post_detail(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(detail))
}

/// Delete a post (author only)
pub async fn delete_post(
    posts: web::Data<PostService>,
    path: web::Path<Uuid>,
    actor: UserId,
) -> Result<HttpResponse> {
    posts.delete_post(path.into_inner(), actor.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Toggle the actor's like on a post
pub async fn toggle_like(
    likes: web::Data<LikeService>,
    path: web::Path<Uuid>,
    actor: UserId,
) -> Result<HttpResponse> {
    let outcome = likes.toggle_like(path.into_inner(), actor.0).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

/// Append a comment to a post
pub async fn add_comment(
    comments: web::Data<CommentService>,
    path: web::Path<Uuid>,
    actor: UserId,
    req: web::Json<CommentRequest>,
) -> Result<HttpResponse> {
    let view = comments
        .add_comment(path.into_inner(), actor.0, &req.text)
        .await?;
    Ok(HttpResponse::Created().json(view))
}

/// Attach tags to an existing post
pub async fn attach_tags(
    tags: web::Data<TagService>,
    path: web::Path<Uuid>,
    _actor: UserId,
    req: web::Json<AttachTagsRequest>,
) -> Result<HttpResponse> {
    let names = tags.attach_tags(path.into_inner(), &req.tags).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "tags": names })))
}

/// Posts authored by one user, paginated
pub async fn get_user_posts(
    feed: web::Data<FeedService>,
    path: web::Path<Uuid>,
    query: web::Query<FeedQueryParams>,
    _actor: UserId,
) -> Result<HttpResponse> {
    let page = feed
        .user_feed(path.into_inner(), query.page, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}
