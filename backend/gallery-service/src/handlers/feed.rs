/// Feed handler - the global reverse-chronological view
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FeedService;

#[derive(Debug, Deserialize)]
pub struct FeedQueryParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn get_feed(
    feed: web::Data<FeedService>,
    query: web::Query<FeedQueryParams>,
    _actor: UserId,
) -> Result<HttpResponse> {
    let page = feed.global_feed(query.page, query.limit).await?;
    Ok(HttpResponse::Ok().json(page))
}
