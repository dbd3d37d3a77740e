mod error;
mod models;
pub mod protocol;
pub mod thread;
pub mod toggle;

pub use error::DomainError;
pub use models::{
    is_blank_html, Author, Comment, CommentId, CommentLike, CommentView, ContactMessage,
    DemoBooking, NewsletterSignup, Slug, SlugBookmark, SlugLike, User, UserId,
};
pub use thread::{organize, CommentTree, ParentKey, Threaded};
pub use toggle::{plan_toggle, Interaction, RemoteMutation, ToggleEntry, TogglePlan};
