use axum::{
    extract::{Path, State},
    Json,
};
use domain::{
    protocol::{BookmarkRequest, LikeRequest},
    CommentId, CommentLike, Slug, SlugBookmark, SlugLike,
};

use crate::auth::AuthUser;
use crate::error::{bad_request, from_storage, not_found, ApiError};
use crate::state::AppState;

pub async fn like_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<LikeRequest>,
) -> Result<Json<CommentLike>, ApiError> {
    let id = CommentId::new(id);
    if state.db.get_comment(id).await.map_err(from_storage)?.is_none() {
        return Err(not_found("Comment"));
    }
    let like = state
        .db
        .like_comment(id, &user.id, payload.like)
        .await
        .map_err(from_storage)?;
    Ok(Json(like))
}

pub async fn delete_like(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, ApiError> {
    state
        .db
        .delete_comment_like(CommentId::new(id), &user.id)
        .await
        .map_err(from_storage)?;
    Ok(Json("Deleted"))
}

pub async fn like_slug(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
    Json(payload): Json<LikeRequest>,
) -> Result<Json<SlugLike>, ApiError> {
    let slug = Slug::new(slug).map_err(bad_request)?;
    let like = state
        .db
        .like_slug(&slug, &user.id, payload.like)
        .await
        .map_err(from_storage)?;
    Ok(Json(like))
}

pub async fn delete_like_slug(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let slug = Slug::new(slug).map_err(bad_request)?;
    state
        .db
        .delete_slug_like(&slug, &user.id)
        .await
        .map_err(from_storage)?;
    Ok(Json("Deleted"))
}

pub async fn bookmark_slug(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
    Json(payload): Json<BookmarkRequest>,
) -> Result<Json<SlugBookmark>, ApiError> {
    let slug = Slug::new(slug).map_err(bad_request)?;
    let bookmark = state
        .db
        .bookmark_slug(&slug, &user.id, payload.bookmark)
        .await
        .map_err(from_storage)?;
    Ok(Json(bookmark))
}

pub async fn delete_bookmark_slug(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(slug): Path<String>,
) -> Result<Json<&'static str>, ApiError> {
    let slug = Slug::new(slug).map_err(bad_request)?;
    state
        .db
        .delete_slug_bookmark(&slug, &user.id)
        .await
        .map_err(from_storage)?;
    Ok(Json("Deleted"))
}
