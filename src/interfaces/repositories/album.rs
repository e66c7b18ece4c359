use async_trait::async_trait;
use std::borrow::Cow;

use crate::{
    entities::album::{Album, AlbumInsert},
    errors::CatalogError,
    repositories::sqlx_repo::SqlxRepo,
};

#[async_trait]
pub trait AlbumRepository: Send + Sync {
    /// Fails with `Conflict` when the name is taken, ignoring case.
    async fn create_album(&self, album: &AlbumInsert) -> Result<Album, CatalogError>;
    async fn get_album_by_id(&self, id: i64) -> Result<Option<Album>, CatalogError>;
    /// Case-insensitive exact match on the album name.
    async fn get_album_by_name(&self, name: &str) -> Result<Option<Album>, CatalogError>;
    async fn list_albums(&self) -> Result<Vec<Album>, CatalogError>;
}

#[async_trait]
impl AlbumRepository for SqlxRepo {
    async fn create_album(&self, album: &AlbumInsert) -> Result<Album, CatalogError> {
        sqlx::query_as::<_, Album>(
            "INSERT INTO albums (name, description) VALUES ($1, $2) RETURNING id, name, description"
        )
        .bind(&album.name)
        .bind(&album.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            match e {
                sqlx::Error::Database(db_err) if db_err.code() == Some(Cow::Borrowed("23505")) => {
                    CatalogError::Conflict("An album with this name already exists".to_string())
                }
                _ => CatalogError::from(e),
            }
        })
    }

    async fn get_album_by_id(&self, id: i64) -> Result<Option<Album>, CatalogError> {
        let album = sqlx::query_as::<_, Album>("SELECT id, name, description FROM albums WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(album)
    }

    async fn get_album_by_name(&self, name: &str) -> Result<Option<Album>, CatalogError> {
        let album = sqlx::query_as::<_, Album>(
            "SELECT id, name, description FROM albums WHERE lower(name) = lower($1)"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(album)
    }

    async fn list_albums(&self) -> Result<Vec<Album>, CatalogError> {
        let albums = sqlx::query_as::<_, Album>("SELECT id, name, description FROM albums ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(albums)
    }
}
