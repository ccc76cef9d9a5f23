//! Caller identity taken from request headers.
//!
//! Authentication happens upstream; this crate only trusts the forwarded
//! `x-user-*` headers and rejects requests that carry no user id.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service::shops::domain::AuthorProfile;

use crate::errors::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_AVATAR_HEADER: &str = "x-user-avatar";

#[derive(Debug, Clone)]
pub struct Caller(pub AuthorProfile);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let user_id = header(USER_ID_HEADER).ok_or_else(ApiError::unauthenticated)?;
        Ok(Caller(AuthorProfile {
            user_id,
            name: header(USER_NAME_HEADER).unwrap_or_default(),
            avatar: header(USER_AVATAR_HEADER).unwrap_or_default(),
        }))
    }
}
