use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    entities::{
        album::{Album, AlbumInsert},
        comment::{sort_in_creation_order, Comment, CommentInsert},
        photo::{Photo, PhotoChanges, PhotoInsert},
        user::{User, UserInsert},
    },
    errors::CatalogError,
    repositories::{
        album::AlbumRepository, comment::CommentRepository, photo::PhotoRepository,
        user::UserRepository,
    },
};

#[derive(Default)]
struct Counters {
    users: i64,
    photos: i64,
    albums: i64,
    comments: i64,
}

fn next(counter: &mut i64) -> i64 {
    *counter += 1;
    *counter
}

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    photos: BTreeMap<i64, Photo>,
    albums: BTreeMap<i64, Album>,
    comments: BTreeMap<i64, Comment>,
    ids: Counters,
    closed: bool,
}

/// In-process store. Clones share the same data.
///
/// Ids are assigned sequentially per collection starting at 1.
/// Every call after [`MemoryRepo::close`] fails with `InternalError`.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryRepo {
    pub fn open() -> Self {
        MemoryRepo::default()
    }

    pub async fn check_connection(&self) -> Result<(), CatalogError> {
        ensure_open(&self.state.read())
    }

    pub async fn close(&self) {
        self.state.write().closed = true;
    }

    fn read<T>(&self, f: impl FnOnce(&MemoryState) -> T) -> Result<T, CatalogError> {
        let state = self.state.read();
        ensure_open(&state)?;
        Ok(f(&state))
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut MemoryState) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let mut state = self.state.write();
        ensure_open(&state)?;
        f(&mut state)
    }
}

fn ensure_open(state: &MemoryState) -> Result<(), CatalogError> {
    if state.closed {
        return Err(CatalogError::InternalError("Store is closed".to_string()));
    }
    Ok(())
}

/// Same outcome Postgres reports for a row pointing at a missing user or photo.
fn foreign_key_violation() -> CatalogError {
    CatalogError::Conflict("Foreign key violation".to_string())
}

#[async_trait]
impl UserRepository for MemoryRepo {
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, CatalogError> {
        self.read(|s| s.users.values().find(|u| u.email == email).cloned())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, CatalogError> {
        self.read(|s| s.users.get(&id).cloned())
    }

    async fn create_user(&self, user: &UserInsert) -> Result<User, CatalogError> {
        self.write(|s| {
            if s.users.values().any(|u| u.email == user.email) {
                return Err(CatalogError::DuplicateEmail);
            }

            let created = User {
                id: next(&mut s.ids.users),
                name: user.name.clone(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                created_at: user.created_at,
            };
            s.users.insert(created.id, created.clone());
            Ok(created)
        })
    }
}

#[async_trait]
impl PhotoRepository for MemoryRepo {
    async fn create_photo(&self, photo: &PhotoInsert) -> Result<Photo, CatalogError> {
        self.write(|s| {
            if !s.users.contains_key(&photo.owner) {
                return Err(foreign_key_violation());
            }
            let created = Photo {
                id: next(&mut s.ids.photos),
                filename: photo.filename.clone(),
                title: photo.title.clone(),
                description: photo.description.clone(),
                tags: photo.tags.clone(),
                albums: photo.albums.clone(),
                visibility: photo.visibility,
                owner: photo.owner,
                date: photo.date,
            };
            s.photos.insert(created.id, created.clone());
            Ok(created)
        })
    }

    async fn get_photo_by_id(&self, id: i64) -> Result<Option<Photo>, CatalogError> {
        self.read(|s| s.photos.get(&id).cloned())
    }

    async fn update_photo_fields(&self, id: i64, changes: &PhotoChanges) -> Result<bool, CatalogError> {
        self.write(|s| match s.photos.get_mut(&id) {
            Some(photo) => {
                changes.apply_to(photo);
                Ok(true)
            }
            None => Ok(false),
        })
    }

    async fn get_photos_in_album(&self, album_id: i64) -> Result<Vec<Photo>, CatalogError> {
        self.read(|s| newest_first(s.photos.values().filter(|p| p.albums.contains(&album_id))))
    }

    async fn get_photos_by_owner(&self, owner: i64) -> Result<Vec<Photo>, CatalogError> {
        self.read(|s| newest_first(s.photos.values().filter(|p| p.owner == owner)))
    }

    async fn search_photos(&self, query: &str) -> Result<Vec<Photo>, CatalogError> {
        let needle = query.to_lowercase();
        self.read(|s| {
            s.photos
                .values()
                .filter(|p| p.matches_lowercase(&needle))
                .cloned()
                .collect()
        })
    }
}

fn newest_first<'a>(photos: impl Iterator<Item = &'a Photo>) -> Vec<Photo> {
    let mut photos: Vec<Photo> = photos.cloned().collect();
    photos.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    photos
}

#[async_trait]
impl AlbumRepository for MemoryRepo {
    async fn create_album(&self, album: &AlbumInsert) -> Result<Album, CatalogError> {
        let key = album.name.to_lowercase();
        self.write(|s| {
            if s.albums.values().any(|a| a.name.to_lowercase() == key) {
                return Err(CatalogError::Conflict(
                    "An album with this name already exists".to_string(),
                ));
            }

            let created = Album {
                id: next(&mut s.ids.albums),
                name: album.name.clone(),
                description: album.description.clone(),
            };
            s.albums.insert(created.id, created.clone());
            Ok(created)
        })
    }

    async fn get_album_by_id(&self, id: i64) -> Result<Option<Album>, CatalogError> {
        self.read(|s| s.albums.get(&id).cloned())
    }

    async fn get_album_by_name(&self, name: &str) -> Result<Option<Album>, CatalogError> {
        let key = name.to_lowercase();
        self.read(|s| s.albums.values().find(|a| a.name.to_lowercase() == key).cloned())
    }

    async fn list_albums(&self) -> Result<Vec<Album>, CatalogError> {
        self.read(|s| s.albums.values().cloned().collect())
    }
}

#[async_trait]
impl CommentRepository for MemoryRepo {
    async fn create_comment(&self, comment: &CommentInsert) -> Result<Comment, CatalogError> {
        self.write(|s| {
            if !s.users.contains_key(&comment.user_id) || !s.photos.contains_key(&comment.photo_id) {
                return Err(foreign_key_violation());
            }
            let created = Comment {
                id: next(&mut s.ids.comments),
                photo_id: comment.photo_id,
                user_id: comment.user_id,
                username: comment.username.clone(),
                text: comment.text.clone(),
                created_at: comment.created_at,
            };
            s.comments.insert(created.id, created.clone());
            Ok(created)
        })
    }

    async fn list_comments_for_photo(&self, photo_id: i64) -> Result<Vec<Comment>, CatalogError> {
        self.read(|s| {
            let mut comments: Vec<Comment> = s
                .comments
                .values()
                .filter(|c| c.photo_id == photo_id)
                .cloned()
                .collect();
            sort_in_creation_order(&mut comments);
            comments
        })
    }
}
