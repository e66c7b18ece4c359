use validator::Validate;

use crate::{
    entities::{
        album::{Album, AlbumView, NewAlbumRequest},
        photo::{PhotoAck, PhotoChanges},
    },
    errors::CatalogError,
    policy::{can_edit, can_view},
    repositories::{album::AlbumRepository, photo::PhotoRepository},
};

pub struct AlbumHandler<A, P>
where
    A: AlbumRepository,
    P: PhotoRepository,
{
    pub album_repo: A,
    pub photo_repo: P,
}

impl<A, P> AlbumHandler<A, P>
where
    A: AlbumRepository,
    P: PhotoRepository,
{
    pub fn new(album_repo: A, photo_repo: P) -> Self {
        AlbumHandler { album_repo, photo_repo }
    }

    /// Creates an album. Names are unique regardless of case.
    pub async fn create_album(&self, request: NewAlbumRequest) -> Result<Album, CatalogError> {
        request.validate()?;
        let insert = request.prepare_for_insert();

        if self.album_repo.get_album_by_name(&insert.name).await?.is_some() {
            return Err(CatalogError::Conflict(format!("Album '{}' already exists", insert.name)));
        }

        let album = self.album_repo.create_album(&insert).await?;

        tracing::info!(album_id = album.id, "Album created");
        Ok(album)
    }

    /// Albums carry no visibility of their own, so every album is listed.
    pub async fn list_albums(&self) -> Result<Vec<Album>, CatalogError> {
        self.album_repo.list_albums().await
    }

    pub async fn find_album_by_name(&self, name: &str) -> Result<Album, CatalogError> {
        self.album_repo
            .get_album_by_name(name.trim())
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Album '{}' not found", name.trim())))
    }

    /// The album plus only those of its photos the caller may view.
    pub async fn get_album_with_visible_photos(
        &self,
        album_id: i64,
        acting_user: Option<i64>,
    ) -> Result<AlbumView, CatalogError> {
        let album = self
            .album_repo
            .get_album_by_id(album_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Album {} not found", album_id)))?;

        let photos = self
            .photo_repo
            .get_photos_in_album(album_id)
            .await?
            .into_iter()
            .filter(|p| can_view(Some(p), acting_user))
            .collect();

        Ok(AlbumView { album, photos })
    }

    /// Places a photo in an album. Only the photo's owner may do this.
    pub async fn add_photo_to_album(
        &self,
        photo_id: i64,
        acting_user: Option<i64>,
        album_id: i64,
    ) -> Result<PhotoAck, CatalogError> {
        let photo = self
            .photo_repo
            .get_photo_by_id(photo_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Photo {} not found", photo_id)))?;

        if !can_edit(Some(&photo), acting_user) {
            tracing::warn!(photo_id, ?acting_user, "Album placement denied");
            return Err(CatalogError::PermissionDenied);
        }

        if self.album_repo.get_album_by_id(album_id).await?.is_none() {
            return Err(CatalogError::NotFound(format!("Album {} not found", album_id)));
        }

        if photo.albums.contains(&album_id) {
            return Ok(PhotoAck::new(photo_id, "Photo already in album"));
        }

        let mut albums = photo.albums;
        albums.push(album_id);
        let changes = PhotoChanges {
            albums: Some(albums),
            ..PhotoChanges::default()
        };

        if !self.photo_repo.update_photo_fields(photo_id, &changes).await? {
            return Err(CatalogError::NotFound(format!("Photo {} not found", photo_id)));
        }

        tracing::info!(photo_id, album_id, "Photo added to album");
        Ok(PhotoAck::new(photo_id, "Photo added to album"))
    }
}
