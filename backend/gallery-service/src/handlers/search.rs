/// Search handler - containment matching over posts, users and tags
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::{SearchScope, SearchService};

#[derive(Debug, Deserialize)]
pub struct SearchQueryParams {
    #[serde(default)]
    pub q: String,
    /// Category filter: posts | users | tags | all (default)
    #[serde(rename = "type")]
    pub scope: Option<String>,
}

pub async fn search(
    searcher: web::Data<SearchService>,
    query: web::Query<SearchQueryParams>,
    _actor: UserId,
) -> Result<HttpResponse> {
    let scope = SearchScope::parse(query.scope.as_deref())
        .ok_or_else(|| AppError::ValidationError("unknown search type".to_string()))?;
    let results = searcher.search(&query.q, scope).await?;
    Ok(HttpResponse::Ok().json(results))
}
