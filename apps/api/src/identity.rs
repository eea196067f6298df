//! Caller identity.
//!
//! Sign-in happens at the external auth provider; its gateway forwards the
//! authenticated user's id in `X-User-Id`. Handlers take `CurrentUser` instead
//! of reading ambient session state.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use crate::errors::AppError;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s.trim()).ok())
            .filter(|id| !id.is_nil())
            .map(CurrentUser)
            .ok_or(AppError::Unauthorized)
    }
}
