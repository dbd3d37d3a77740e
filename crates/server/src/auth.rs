use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
};
use domain::User;
use sha2::{Digest, Sha256};

use crate::error::{internal, ApiError};
use crate::state::AppState;

/// The signed-in user behind the request's bearer session token.
pub struct AuthUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let token = bearer_token(&parts.headers).ok_or((
            StatusCode::UNAUTHORIZED,
            "Missing session token".to_string(),
        ))?;

        let user = state
            .db
            .find_session_user(&hash_token(token))
            .await
            .map_err(internal)?
            .ok_or((
                StatusCode::UNAUTHORIZED,
                "Invalid or expired session".to_string(),
            ))?;

        Ok(AuthUser(user))
    }
}

pub fn require_admin(headers: &HeaderMap, admin_token: &str) -> Result<(), ApiError> {
    let token = bearer_token(headers).ok_or((
        StatusCode::UNAUTHORIZED,
        "Missing Authorization header".to_string(),
    ))?;
    if token != admin_token {
        return Err((StatusCode::FORBIDDEN, "Invalid Admin Token".to_string()));
    }
    Ok(())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub fn generate_token() -> String {
    hex::encode(rand::random::<[u8; 32]>())
}

// 数据库里只存 SHA-256
pub fn hash_token(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
