use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{domain::entities::not_blank, errors::CatalogError};

const MAX_TITLE_LENGTH: u64 = 200;
const MAX_DESCRIPTION_LENGTH: u64 = 5_000;
const MAX_TAG_LENGTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = CatalogError;

    /// Only the two canonical lowercase spellings are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(CatalogError::validation(
                "visibility",
                format!("Visibility must be 'public' or 'private', got '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ───── Database Models ───────────────────────────────────────────────

/// Row shape as stored; `visibility` is free text until converted.
#[derive(Debug, sqlx::FromRow)]
pub struct PhotoRow {
    pub id: i64,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub albums: Vec<i64>,
    pub visibility: String,
    pub owner: i64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Photo {
    pub id: i64,
    pub filename: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub albums: Vec<i64>,
    pub visibility: Visibility,
    pub owner: i64,
    pub date: DateTime<Utc>,
}

impl TryFrom<PhotoRow> for Photo {
    type Error = CatalogError;

    fn try_from(row: PhotoRow) -> Result<Self, Self::Error> {
        let visibility = row.visibility.parse().map_err(|_| {
            CatalogError::InternalError(format!(
                "Photo {} has corrupt visibility '{}'",
                row.id, row.visibility
            ))
        })?;

        Ok(Photo {
            id: row.id,
            filename: row.filename,
            title: row.title,
            description: row.description,
            tags: row.tags,
            albums: row.albums,
            visibility,
            owner: row.owner,
            date: row.date,
        })
    }
}

impl Photo {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive substring match over title, description and tags.
    /// `needle` must already be lowercased.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone)]
pub struct PhotoInsert {
    pub filename: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub albums: Vec<i64>,
    pub visibility: Visibility,
    pub owner: i64,
    pub date: DateTime<Utc>,
}

/// Field-level changes handed to the store. `None` leaves the stored value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    pub tags: Option<Vec<String>>,
    pub albums: Option<Vec<i64>>,
}

impl PhotoChanges {
    pub fn is_empty(&self) -> bool {
        *self == PhotoChanges::default()
    }

    /// Applies the changes to an in-hand record.
    pub fn apply_to(&self, photo: &mut Photo) {
        if let Some(title) = &self.title {
            photo.title = title.clone();
        }
        if let Some(description) = &self.description {
            photo.description = description.clone();
        }
        if let Some(visibility) = self.visibility {
            photo.visibility = visibility;
        }
        if let Some(tags) = &self.tags {
            photo.tags = tags.clone();
        }
        if let Some(albums) = &self.albums {
            photo.albums = albums.clone();
        }
    }
}

// ───── Input & Validation Requests ──────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct NewPhotoRequest {
    #[validate(custom(function = "not_blank", message = "Filename cannot be empty"))]
    pub filename: String,

    #[serde(default)]
    #[validate(length(max = MAX_TITLE_LENGTH, message = "Title is too long"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = MAX_DESCRIPTION_LENGTH, message = "Description is too long"))]
    pub description: String,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Raw visibility text; defaults to public when absent.
    #[serde(default)]
    pub visibility: Option<String>,
}

impl NewPhotoRequest {
    pub fn new(filename: impl Into<String>) -> Self {
        NewPhotoRequest {
            filename: filename.into(),
            title: String::new(),
            description: String::new(),
            tags: Vec::new(),
            visibility: None,
        }
    }

    pub fn prepare_for_insert(&self, owner: i64) -> Result<PhotoInsert, CatalogError> {
        let visibility = match &self.visibility {
            Some(raw) => raw.parse()?,
            None => Visibility::Public,
        };

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let tag = normalize_tag(tag)?;
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }

        Ok(PhotoInsert {
            filename: self.filename.trim().to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            tags,
            albums: Vec::new(),
            visibility,
            owner,
            date: Utc::now(),
        })
    }
}

/// Partial update of photo metadata.
///
/// Omitted fields are left unchanged. A present field is applied as given,
/// so `Some(String::new())` clears a title or description on purpose.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdatePhotoRequest {
    #[validate(length(max = MAX_TITLE_LENGTH, message = "Title is too long"))]
    pub title: Option<String>,

    #[validate(length(max = MAX_DESCRIPTION_LENGTH, message = "Description is too long"))]
    pub description: Option<String>,

    /// Raw text so that unknown values can be rejected instead of coerced.
    pub visibility: Option<String>,
}

impl UpdatePhotoRequest {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn visibility(mut self, visibility: impl Into<String>) -> Self {
        self.visibility = Some(visibility.into());
        self
    }

    /// Validates the patch and converts it into store-level changes.
    pub fn into_changes(self) -> Result<PhotoChanges, CatalogError> {
        self.validate()?;

        let visibility = self
            .visibility
            .as_deref()
            .map(Visibility::from_str)
            .transpose()?;

        Ok(PhotoChanges {
            title: self.title,
            description: self.description,
            visibility,
            ..PhotoChanges::default()
        })
    }
}

/// Trims a tag and enforces the non-empty and length rules.
pub fn normalize_tag(tag: &str) -> Result<String, CatalogError> {
    let tag = tag.trim();
    if tag.is_empty() {
        return Err(CatalogError::validation("tag", "Tag cannot be empty"));
    }
    if tag.chars().count() > MAX_TAG_LENGTH {
        return Err(CatalogError::validation(
            "tag",
            format!("Tag must be at most {} characters", MAX_TAG_LENGTH),
        ));
    }
    Ok(tag.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoAck {
    pub id: i64,
    pub message: String,
}

impl PhotoAck {
    pub fn new(id: i64, message: impl Into<String>) -> Self {
        PhotoAck {
            id,
            message: message.into(),
        }
    }
}
