use async_trait::async_trait;
use std::borrow::Cow;

use crate::{
    entities::user::{User, UserInsert},
    errors::CatalogError,
    repositories::sqlx_repo::SqlxRepo,
};

/// Identity store.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, CatalogError>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, CatalogError>;
    /// Fails with `DuplicateEmail` when the email is taken.
    async fn create_user(&self, user: &UserInsert) -> Result<User, CatalogError>;
}

#[async_trait]
impl UserRepository for SqlxRepo {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1"
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, CatalogError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(CatalogError::from)
    }

    async fn create_user(&self, user: &UserInsert) -> Result<User, CatalogError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    CatalogError::DuplicateEmail
                }
                _ => CatalogError::from(e),
            }
        })
    }
}
