/// User handlers - registration, profiles and the follow toggle
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::{FollowService, UserService};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub avatar: Option<String>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
}

/// Register a user profile. Credentials are handled by the identity
/// provider; this only records the profile record.
pub async fn register(
    users: web::Data<UserService>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let profile = users
        .register(&req.username, &req.email, &req.full_name, req.avatar.clone())
        .await?;
    Ok(HttpResponse::Created().json(profile))
}

/// Current actor's profile
pub async fn get_me(users: web::Data<UserService>, user_id: UserId) -> Result<HttpResponse> {
    let profile = users.profile(user_id.0).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Update the current actor's profile
pub async fn update_me(
    users: web::Data<UserService>,
    user_id: UserId,
    req: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse> {
    let profile = users
        .update_profile(
            user_id.0,
            req.full_name.as_deref(),
            req.email.as_deref(),
            req.avatar.clone(),
        )
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Profile by id, with the actor's follow state projected
pub async fn get_user(
    users: web::Data<UserService>,
    path: web::Path<Uuid>,
    actor: UserId,
) -> Result<HttpResponse> {
    let profile = users.profile_for(path.into_inner(), Some(actor.0)).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// Users following the given profile
pub async fn get_followers(
    users: web::Data<UserService>,
    path: web::Path<Uuid>,
    _actor: UserId,
) -> Result<HttpResponse> {
    let list = users.followers(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Users the given profile follows
pub async fn get_following(
    users: web::Data<UserService>,
    path: web::Path<Uuid>,
    _actor: UserId,
) -> Result<HttpResponse> {
    let list = users.following(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(list))
}

/// Toggle the follow edge from the actor to the target user
pub async fn toggle_follow(
    follows: web::Data<FollowService>,
    path: web::Path<Uuid>,
    actor: UserId,
) -> Result<HttpResponse> {
    let outcome = follows.toggle_follow(actor.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
