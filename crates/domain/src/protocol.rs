//! JSON bodies exchanged between the HTTP service and its clients.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{CommentId, Slug, UserId};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCommentRequest {
    pub comment: String,
    pub slug: Slug,
    pub parent_id: Option<CommentId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub like: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkRequest {
    pub bookmark: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountLikesRequest {
    pub like_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsletterRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
    pub residence: String,
    pub property: String,
    pub units: String,
    pub volume: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub token: String,
    pub user_id: UserId,
    pub expires_at: NaiveDateTime,
}

/// Minimal sanity check applied to lead-capture emails.
pub fn looks_like_email(email: &str) -> bool {
    match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}
