use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{not_blank, photo::Photo};

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Album {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug)]
pub struct AlbumInsert {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewAlbumRequest {
    #[validate(
        length(max = 120, message = "Album name is too long"),
        custom(function = "not_blank", message = "Album name cannot be empty")
    )]
    pub name: String,

    #[serde(default)]
    pub description: String,
}

impl NewAlbumRequest {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        NewAlbumRequest {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn prepare_for_insert(&self) -> AlbumInsert {
        AlbumInsert {
            name: self.name.trim().to_string(),
            description: self.description.clone(),
        }
    }
}

/// An album together with the subset of its photos the caller may see.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumView {
    pub album: Album,
    pub photos: Vec<Photo>,
}

impl AlbumView {
    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }
}
