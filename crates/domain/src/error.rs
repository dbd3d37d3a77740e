use crate::models::{CommentId, Slug};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
    #[error("comment body is empty")]
    EmptyComment,
    #[error("parent comment {0} does not exist")]
    ParentNotFound(CommentId),
    #[error("parent comment {parent} belongs to '{parent_slug}', not '{slug}'")]
    ParentSlugMismatch {
        parent: CommentId,
        parent_slug: Slug,
        slug: Slug,
    },
}
