use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::{
    is_blank_html,
    protocol::{CountLikesRequest, PostCommentRequest},
    Comment, CommentId, CommentView, DomainError, Slug,
};
use tracing::info;

use crate::auth::AuthUser;
use crate::error::{bad_request, from_storage, not_found, ApiError};
use crate::state::AppState;

const MAX_COMMENT_LEN: usize = 16 * 1024;

pub async fn list_comments(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Vec<CommentView>>, ApiError> {
    let slug = Slug::new(slug).map_err(bad_request)?;
    let comments = state.db.list_comments(&slug).await.map_err(from_storage)?;
    Ok(Json(comments))
}

pub async fn post_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(payload): Json<PostCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    if is_blank_html(&payload.comment) {
        return Err(bad_request(DomainError::EmptyComment));
    }
    if payload.comment.len() > MAX_COMMENT_LEN {
        return Err(bad_request(format!(
            "Comment is too long (max {} bytes)",
            MAX_COMMENT_LEN
        )));
    }

    let comment = state
        .db
        .insert_comment(&payload.slug, &user.id, &payload.comment, payload.parent_id)
        .await
        .map_err(from_storage)?;

    info!(
        "Comment {} posted on {} by {} (parent: {:?})",
        comment.id, comment.slug, user.id, comment.parent_id
    );
    Ok((StatusCode::CREATED, Json(comment)))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<&'static str>, ApiError> {
    let id = CommentId::new(id);
    // 只能删除自己的评论
    if !state
        .db
        .delete_comment(id, &user.id)
        .await
        .map_err(from_storage)?
    {
        return Err(not_found("Comment"));
    }
    info!("Comment {} deleted by {}", id, user.id);
    Ok(Json("Deleted"))
}

pub async fn count_likes(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    Path(id): Path<i64>,
    Json(payload): Json<CountLikesRequest>,
) -> Result<Json<&'static str>, ApiError> {
    if payload.like_count < 0 {
        return Err(bad_request("like_count cannot be negative"));
    }
    if !state
        .db
        .set_like_count(CommentId::new(id), payload.like_count)
        .await
        .map_err(from_storage)?
    {
        return Err(not_found("Comment"));
    }
    Ok(Json("Updated"))
}
