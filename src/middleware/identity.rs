//! Caller identity.
//!
//! Authentication happens upstream; this middleware only requires the
//! authenticated user id forwarded in `X-User-Id` and stores it in request
//! extensions.

use crate::error::{ApiError, Result};
use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

const MAX_USER_ID_LEN: usize = 128;

/// Request extension storing the caller's user id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub user_id: String,
}

pub async fn identity_middleware(mut request: Request, next: Next) -> Result<Response> {
    let user_id = request
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Missing X-User-Id header".to_string()))?;

    if user_id.len() > MAX_USER_ID_LEN {
        return Err(ApiError::BadRequest("X-User-Id is too long".to_string()));
    }

    let identity = UserIdentity {
        user_id: user_id.to_string(),
    };
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Axum extractor for the caller identity.
/// Only works on routes protected by identity_middleware.
impl<S> FromRequestParts<S> for UserIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserIdentity>()
            .cloned()
            .ok_or_else(|| {
                ApiError::Internal(anyhow::anyhow!(
                    "UserIdentity not found - identity middleware not applied"
                ))
            })
    }
}
