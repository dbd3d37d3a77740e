use anyhow::Result;
use async_trait::async_trait;
use domain::{CommentId, CommentView, Slug};

use crate::notify::Notification;

/// The backend procedures the widget talks to.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    async fn post_comment(
        &self,
        comment: &str,
        slug: &Slug,
        parent_id: Option<CommentId>,
    ) -> Result<()>;
    async fn delete_comment(&self, id: CommentId) -> Result<()>;
    async fn comments_by_slug(&self, slug: &Slug) -> Result<Vec<CommentView>>;

    async fn like_comment(&self, comment_id: CommentId, like: bool) -> Result<()>;
    async fn delete_like(&self, comment_id: CommentId) -> Result<()>;
    async fn count_likes(&self, id: CommentId, like_count: i64) -> Result<()>;

    async fn like_slug(&self, slug: &Slug, like: bool) -> Result<()>;
    async fn delete_like_slug(&self, slug: &Slug) -> Result<()>;

    async fn bookmark_slug(&self, slug: &Slug, bookmark: bool) -> Result<()>;
    async fn delete_bookmark_slug(&self, slug: &Slug) -> Result<()>;
}

#[async_trait]
pub trait SessionGate: Send + Sync {
    fn is_signed_in(&self) -> bool;
    async fn sign_in(&self);
}

pub trait Notifier: Send + Sync {
    fn show(&self, notification: Notification);
}
