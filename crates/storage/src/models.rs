use chrono::NaiveDateTime;
use domain::{
    Author, Comment, CommentId, CommentLike, CommentView, ContactMessage, DemoBooking,
    NewsletterSignup, Slug, SlugBookmark, SlugLike, User, UserId,
};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub id: i64,
    pub slug: String,
    pub user_id: String,
    pub parent_id: Option<i64>,
    pub body: String,
    pub like_count: Option<i64>,
    pub created_at: NaiveDateTime,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: CommentId::new(sql.id),
            parent_id: sql.parent_id.map(CommentId::new),
            slug: Slug::new_unchecked(sql.slug),
            author_id: UserId::new(sql.user_id),
            body: sql.body,
            created_at: sql.created_at,
            like_count: sql.like_count,
        }
    }
}

// Join 字段 (来自 users 表)
#[derive(FromRow)]
pub struct SqlCommentView {
    #[sqlx(flatten)]
    pub comment: SqlComment,
    pub author_name: Option<String>,
    pub author_image: Option<String>,
}

impl From<SqlCommentView> for CommentView {
    fn from(sql: SqlCommentView) -> Self {
        let comment = Comment::from(sql.comment);
        let author = Author {
            id: comment.author_id.clone(),
            name: sql.author_name,
            image: sql.author_image,
        };
        CommentView { comment, author }
    }
}

#[derive(FromRow)]
pub struct SqlUser {
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub image: Option<String>,
    pub role: Option<String>,
}

impl From<SqlUser> for User {
    fn from(sql: SqlUser) -> Self {
        User {
            id: UserId::new(sql.id),
            name: sql.name,
            email: sql.email,
            image: sql.image,
            role: sql.role,
        }
    }
}

#[derive(FromRow)]
pub struct SqlCommentLike {
    pub id: i64,
    pub comment_id: i64,
    pub user_id: String,
    pub like: bool,
    pub created_at: NaiveDateTime,
}

impl From<SqlCommentLike> for CommentLike {
    fn from(sql: SqlCommentLike) -> Self {
        CommentLike {
            id: sql.id,
            comment_id: CommentId::new(sql.comment_id),
            user_id: UserId::new(sql.user_id),
            like: sql.like,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlSlugLike {
    pub id: i64,
    pub slug: String,
    pub user_id: String,
    pub like: bool,
    pub created_at: NaiveDateTime,
}

impl From<SqlSlugLike> for SlugLike {
    fn from(sql: SqlSlugLike) -> Self {
        SlugLike {
            id: sql.id,
            slug: Slug::new_unchecked(sql.slug),
            user_id: UserId::new(sql.user_id),
            like: sql.like,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlSlugBookmark {
    pub id: i64,
    pub slug: String,
    pub user_id: String,
    pub bookmark: bool,
    pub created_at: NaiveDateTime,
}

impl From<SqlSlugBookmark> for SlugBookmark {
    fn from(sql: SqlSlugBookmark) -> Self {
        SlugBookmark {
            id: sql.id,
            slug: Slug::new_unchecked(sql.slug),
            user_id: UserId::new(sql.user_id),
            bookmark: sql.bookmark,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlNewsletterSignup {
    pub id: i64,
    pub email: String,
    pub created_at: NaiveDateTime,
}

impl From<SqlNewsletterSignup> for NewsletterSignup {
    fn from(sql: SqlNewsletterSignup) -> Self {
        NewsletterSignup {
            id: sql.id,
            email: sql.email,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlDemoBooking {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
    pub created_at: NaiveDateTime,
}

impl From<SqlDemoBooking> for DemoBooking {
    fn from(sql: SqlDemoBooking) -> Self {
        DemoBooking {
            id: sql.id,
            first_name: sql.first_name,
            last_name: sql.last_name,
            email: sql.email,
            number: sql.number,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlContactMessage {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub number: String,
    pub residence: String,
    pub property: String,
    pub units: String,
    pub volume: String,
    pub message: String,
    pub created_at: NaiveDateTime,
}

impl From<SqlContactMessage> for ContactMessage {
    fn from(sql: SqlContactMessage) -> Self {
        ContactMessage {
            id: sql.id,
            first_name: sql.first_name,
            last_name: sql.last_name,
            email: sql.email,
            number: sql.number,
            residence: sql.residence,
            property: sql.property,
            units: sql.units,
            volume: sql.volume,
            message: sql.message,
            created_at: sql.created_at,
        }
    }
}
