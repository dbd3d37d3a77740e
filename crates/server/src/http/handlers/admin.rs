use axum::{
    extract::State,
    http::HeaderMap,
    Json,
};
use chrono::Utc;
use domain::{
    protocol::{CreateSessionRequest, SessionResponse},
    User,
};
use tracing::info;

use crate::auth::{generate_token, hash_token, require_admin};
use crate::error::{internal, ApiError};
use crate::state::AppState;

/// Upserts the user and issues a fresh session token for it.
pub async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    require_admin(&headers, &state.admin_token)?;

    let user = User {
        id: payload.user_id,
        name: payload.name,
        email: payload.email,
        image: payload.image,
        role: None,
    };
    state.db.upsert_user(&user).await.map_err(internal)?;

    let token = generate_token();
    let expires_at = Utc::now().naive_utc() + state.session_ttl;
    state
        .db
        .create_session(&hash_token(&token), &user.id, expires_at)
        .await
        .map_err(internal)?;

    info!("Issued session for {} (expires {})", user.id, expires_at);
    Ok(Json(SessionResponse {
        token,
        user_id: user.id,
        expires_at,
    }))
}
