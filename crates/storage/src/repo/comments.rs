use crate::{
    models::{SqlComment, SqlCommentView},
    Db,
};
use chrono::Utc;
use domain::{toggle::normalize_count, Comment, CommentId, CommentView, DomainError, Slug, UserId};
use sqlx::Row;

impl Db {
    // 写入评论：父评论必须已存在且属于同一 slug，因此回复链不可能成环
    pub async fn insert_comment(
        &self,
        slug: &Slug,
        author_id: &UserId,
        body: &str,
        parent_id: Option<CommentId>,
    ) -> anyhow::Result<Comment> {
        let mut tx = self.pool.begin().await?;

        if let Some(parent) = parent_id {
            let row = sqlx::query("SELECT slug FROM comments WHERE id = ?")
                .bind(parent.get())
                .fetch_optional(&mut *tx)
                .await?;
            let parent_slug: String = match row {
                Some(r) => r.get(0),
                None => return Err(DomainError::ParentNotFound(parent).into()),
            };
            if parent_slug != slug.as_str() {
                return Err(DomainError::ParentSlugMismatch {
                    parent,
                    parent_slug: Slug::new_unchecked(parent_slug),
                    slug: slug.clone(),
                }
                .into());
            }
        }

        let created_at = Utc::now().naive_utc();
        let result = sqlx::query(
            r#"
            INSERT INTO comments (slug, user_id, parent_id, body, like_count, created_at)
            VALUES (?, ?, ?, ?, NULL, ?)
            "#,
        )
        .bind(slug.as_str())
        .bind(author_id.as_str())
        .bind(parent_id.map(CommentId::get))
        .bind(body)
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Comment {
            id: CommentId::new(result.last_insert_rowid()),
            parent_id,
            slug: slug.clone(),
            author_id: author_id.clone(),
            body: body.to_string(),
            created_at,
            like_count: None,
        })
    }

    pub async fn get_comment(&self, id: CommentId) -> anyhow::Result<Option<Comment>> {
        let row = sqlx::query_as::<_, SqlComment>(
            r#"
            SELECT id, slug, user_id, parent_id, body, like_count, created_at
            FROM comments
            WHERE id = ?
            "#,
        )
        .bind(id.get())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Comments of one slug with their authors, grouped parent-first then by creation time.
    pub async fn list_comments(&self, slug: &Slug) -> anyhow::Result<Vec<CommentView>> {
        let rows = sqlx::query_as::<_, SqlCommentView>(
            r#"
            SELECT
                c.id, c.slug, c.user_id, c.parent_id, c.body, c.like_count, c.created_at,
                u.name AS author_name,
                u.image AS author_image
            FROM comments c
            JOIN users u ON c.user_id = u.id
            WHERE c.slug = ?
            ORDER BY c.parent_id ASC, c.created_at ASC, c.id ASC
            "#,
        )
        .bind(slug.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    // 硬删除：回复不级联删除，只是成为孤儿
    pub async fn delete_comment(&self, id: CommentId, author_id: &UserId) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM comments WHERE id = ? AND user_id = ?")
            .bind(id.get())
            .bind(author_id.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted > 0 {
            sqlx::query("DELETE FROM comment_likes WHERE comment_id = ?")
                .bind(id.get())
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(deleted > 0)
    }

    pub async fn set_like_count(&self, id: CommentId, like_count: i64) -> anyhow::Result<bool> {
        let updated = sqlx::query(
            "UPDATE comments SET like_count = ?, updated_at = ? WHERE id = ?",
        )
        .bind(normalize_count(like_count))
        .bind(Utc::now().naive_utc())
        .bind(id.get())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }
}
