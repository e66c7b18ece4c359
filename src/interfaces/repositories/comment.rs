use async_trait::async_trait;

use crate::{
    entities::comment::{Comment, CommentInsert},
    errors::CatalogError,
    repositories::sqlx_repo::SqlxRepo,
};

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Stores the comment and returns it with its assigned id.
    async fn create_comment(&self, comment: &CommentInsert) -> Result<Comment, CatalogError>;
    /// Oldest first, ties broken by id.
    async fn list_comments_for_photo(&self, photo_id: i64) -> Result<Vec<Comment>, CatalogError>;
}

#[async_trait]
impl CommentRepository for SqlxRepo {
    async fn create_comment(&self, comment: &CommentInsert) -> Result<Comment, CatalogError> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (photo_id, user_id, username, text, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, photo_id, user_id, username, text, created_at
            "#,
        )
        .bind(comment.photo_id)
        .bind(comment.user_id)
        .bind(&comment.username)
        .bind(&comment.text)
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_comments_for_photo(&self, photo_id: i64) -> Result<Vec<Comment>, CatalogError> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, photo_id, user_id, username, text, created_at
            FROM comments
            WHERE photo_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(photo_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
