use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::AppState;
use crate::db::{models::User, queries};
use crate::error::AppError;

/// Authenticated caller, resolved from `Authorization: Bearer <api_key>`.
/// Handlers take this extractor and pass the owner id explicitly to queries,
/// so the per-user filter is mandatory rather than ambient request state.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let user = queries::find_user_by_api_key(&state.db, token)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => AppError::Unauthorized("Invalid API key".to_string()),
                _ => AppError::DatabaseError(e.to_string()),
            })?;

        Ok(AuthUser(user))
    }
}
