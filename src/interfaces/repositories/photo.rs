use async_trait::async_trait;

use crate::{
    entities::photo::{Photo, PhotoChanges, PhotoInsert, PhotoRow},
    errors::CatalogError,
    repositories::sqlx_repo::{like_pattern, SqlxRepo},
};

const PHOTO_COLUMNS: &str =
    "id, filename, title, description, tags, albums, visibility, owner, date";

#[async_trait]
pub trait PhotoRepository: Send + Sync {
    async fn create_photo(&self, photo: &PhotoInsert) -> Result<Photo, CatalogError>;
    async fn get_photo_by_id(&self, id: i64) -> Result<Option<Photo>, CatalogError>;
    /// Writes only the fields set in `changes`. Returns whether a record matched.
    async fn update_photo_fields(&self, id: i64, changes: &PhotoChanges) -> Result<bool, CatalogError>;
    async fn get_photos_in_album(&self, album_id: i64) -> Result<Vec<Photo>, CatalogError>;
    async fn get_photos_by_owner(&self, owner: i64) -> Result<Vec<Photo>, CatalogError>;
    /// Candidate photos whose title, description or a tag contains `query`,
    /// ignoring case. Ordered by id. No visibility filtering happens here.
    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>, CatalogError>;
}

fn into_photos(rows: Vec<PhotoRow>) -> Result<Vec<Photo>, CatalogError> {
    rows.into_iter().map(Photo::try_from).collect()
}

#[async_trait]
impl PhotoRepository for SqlxRepo {
    async fn create_photo(&self, photo: &PhotoInsert) -> Result<Photo, CatalogError> {
        let row = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            INSERT INTO photos (filename, title, description, tags, albums, visibility, owner, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PHOTO_COLUMNS}
            "#
        ))
        .bind(&photo.filename)
        .bind(&photo.title)
        .bind(&photo.description)
        .bind(&photo.tags)
        .bind(&photo.albums)
        .bind(photo.visibility.as_str())
        .bind(photo.owner)
        .bind(photo.date)
        .fetch_one(&self.pool)
        .await?;

        Photo::try_from(row)
    }

    async fn get_photo_by_id(&self, id: i64) -> Result<Option<Photo>, CatalogError> {
        sqlx::query_as::<_, PhotoRow>(&format!("SELECT {PHOTO_COLUMNS} FROM photos WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Photo::try_from)
            .transpose()
    }

    async fn update_photo_fields(&self, id: i64, changes: &PhotoChanges) -> Result<bool, CatalogError> {
        // COALESCE keeps the stored value wherever a change is absent
        let result = sqlx::query(
            r#"
            UPDATE photos SET
                title = COALESCE($1::TEXT, title),
                description = COALESCE($2::TEXT, description),
                visibility = COALESCE($3::TEXT, visibility),
                tags = COALESCE($4::TEXT[], tags),
                albums = COALESCE($5::BIGINT[], albums)
            WHERE id = $6
            "#,
        )
        .bind(changes.title.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.visibility.map(|v| v.as_str()))
        .bind(changes.tags.as_deref())
        .bind(changes.albums.as_deref())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_photos_in_album(&self, album_id: i64) -> Result<Vec<Photo>, CatalogError> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE $1 = ANY(albums) ORDER BY date DESC, id DESC"
        ))
        .bind(album_id)
        .fetch_all(&self.pool)
        .await?;

        into_photos(rows)
    }

    async fn get_photos_by_owner(&self, owner: i64) -> Result<Vec<Photo>, CatalogError> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            "SELECT {PHOTO_COLUMNS} FROM photos WHERE owner = $1 ORDER BY date DESC, id DESC"
        ))
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        into_photos(rows)
    }

    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>, CatalogError> {
        let rows = sqlx::query_as::<_, PhotoRow>(&format!(
            r#"
            SELECT {PHOTO_COLUMNS} FROM photos
            WHERE title ILIKE $1
               OR description ILIKE $1
               OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $1)
            ORDER BY id
            "#
        ))
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;

        into_photos(rows)
    }
}
