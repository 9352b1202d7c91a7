/// Tag handler - posts carrying a tag, resolved by normalized name
use actix_web::{web, HttpResponse};

use crate::error::Result;
use crate::middleware::UserId;
use crate::services::FeedService;

use super::feed::FeedQueryParams;

pub async fn tag_feed(
    feed: web::Data<FeedService>,
    path: web::Path<String>,
    query: web::Query<FeedQueryParams>,
    _actor: UserId,
) -> Result<HttpResponse> {
    let page = feed
        .tag_feed(&path.into_inner(), query.page, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}
