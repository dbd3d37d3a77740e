use crate::{
    models::{SqlCommentLike, SqlSlugBookmark, SqlSlugLike},
    Db,
};
use chrono::Utc;
use domain::{CommentId, CommentLike, Slug, SlugBookmark, SlugLike, UserId};

// 每个 (对象, 用户) 只保留一行，重复点赞覆盖旧值
impl Db {
    pub async fn like_comment(
        &self,
        comment_id: CommentId,
        user_id: &UserId,
        like: bool,
    ) -> anyhow::Result<CommentLike> {
        let row = sqlx::query_as::<_, SqlCommentLike>(
            r#"
            INSERT INTO comment_likes (comment_id, user_id, "like", created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(comment_id, user_id) DO UPDATE SET "like" = excluded."like"
            RETURNING id, comment_id, user_id, "like", created_at
            "#,
        )
        .bind(comment_id.get())
        .bind(user_id.as_str())
        .bind(like)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn delete_comment_like(
        &self,
        comment_id: CommentId,
        user_id: &UserId,
    ) -> anyhow::Result<bool> {
        let deleted = sqlx::query("DELETE FROM comment_likes WHERE comment_id = ? AND user_id = ?")
            .bind(comment_id.get())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    pub async fn like_slug(
        &self,
        slug: &Slug,
        user_id: &UserId,
        like: bool,
    ) -> anyhow::Result<SlugLike> {
        let row = sqlx::query_as::<_, SqlSlugLike>(
            r#"
            INSERT INTO slug_likes (slug, user_id, "like", created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(slug, user_id) DO UPDATE SET "like" = excluded."like"
            RETURNING id, slug, user_id, "like", created_at
            "#,
        )
        .bind(slug.as_str())
        .bind(user_id.as_str())
        .bind(like)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn delete_slug_like(&self, slug: &Slug, user_id: &UserId) -> anyhow::Result<bool> {
        let deleted = sqlx::query("DELETE FROM slug_likes WHERE slug = ? AND user_id = ?")
            .bind(slug.as_str())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }

    pub async fn bookmark_slug(
        &self,
        slug: &Slug,
        user_id: &UserId,
        bookmark: bool,
    ) -> anyhow::Result<SlugBookmark> {
        let row = sqlx::query_as::<_, SqlSlugBookmark>(
            r#"
            INSERT INTO slug_bookmarks (slug, user_id, bookmark, created_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(slug, user_id) DO UPDATE SET bookmark = excluded.bookmark
            RETURNING id, slug, user_id, bookmark, created_at
            "#,
        )
        .bind(slug.as_str())
        .bind(user_id.as_str())
        .bind(bookmark)
        .bind(Utc::now().naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn delete_slug_bookmark(
        &self,
        slug: &Slug,
        user_id: &UserId,
    ) -> anyhow::Result<bool> {
        let deleted = sqlx::query("DELETE FROM slug_bookmarks WHERE slug = ? AND user_id = ?")
            .bind(slug.as_str())
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(deleted > 0)
    }
}
