/// HTTP middleware utilities for gallery-service
///
/// The identity provider collaborator authenticates callers at the edge and
/// forwards the resolved actor id in the `X-User-Id` header; the core
/// trusts that identifier without re-validating credentials.
use actix_web::{error::ErrorUnauthorized, Error, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Authenticated actor identifier for the current request
#[derive(Debug, Clone, Copy)]
pub struct UserId(pub Uuid);

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let parsed = req
            .headers()
            .get("X-User-Id")
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ErrorUnauthorized("Missing X-User-Id header"))
            .and_then(|raw| {
                Uuid::parse_str(raw).map_err(|_| ErrorUnauthorized("Invalid user ID"))
            })
            .map(UserId);

        ready(parsed)
    }
}
