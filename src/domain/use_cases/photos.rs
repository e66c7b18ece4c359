use std::sync::Arc;

use validator::Validate;

use crate::{
    entities::{
        comment::{sort_in_creation_order, Comment, NewComment, PhotoWithComments},
        photo::{normalize_tag, NewPhotoRequest, Photo, PhotoAck, PhotoChanges, UpdatePhotoRequest},
    },
    errors::CatalogError,
    interfaces::notifier::Notifier,
    policy::{can_comment, can_edit, can_view},
    repositories::{comment::CommentRepository, photo::PhotoRepository},
};

/// Reads and mutations on individual photos and their comments.
///
/// Every mutation looks the photo up, checks policy, validates, and only
/// then writes. A failed check never reaches the store.
pub struct PhotoHandler<P, C>
where
    P: PhotoRepository,
    C: CommentRepository,
{
    pub photo_repo: P,
    pub comment_repo: C,
    notifier: Option<Arc<dyn Notifier>>,
}

impl<P, C> PhotoHandler<P, C>
where
    P: PhotoRepository,
    C: CommentRepository,
{
    pub fn new(photo_repo: P, comment_repo: C) -> Self {
        PhotoHandler {
            photo_repo,
            comment_repo,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    async fn find_photo(&self, photo_id: i64) -> Result<Photo, CatalogError> {
        self.photo_repo
            .get_photo_by_id(photo_id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(format!("Photo {} not found", photo_id)))
    }

    async fn find_editable_photo(&self, photo_id: i64, acting_user: Option<i64>) -> Result<Photo, CatalogError> {
        let photo = self.find_photo(photo_id).await?;
        if !can_edit(Some(&photo), acting_user) {
            tracing::warn!(photo_id, ?acting_user, "Edit denied");
            return Err(CatalogError::PermissionDenied);
        }
        Ok(photo)
    }

    async fn persist(&self, photo_id: i64, changes: &PhotoChanges) -> Result<(), CatalogError> {
        if !self.photo_repo.update_photo_fields(photo_id, changes).await? {
            return Err(CatalogError::NotFound(format!("Photo {} not found", photo_id)));
        }
        Ok(())
    }

    /// Records metadata for an upload that is already stored. The acting user becomes the owner.
    pub async fn create_photo(&self, acting_user: i64, request: NewPhotoRequest) -> Result<Photo, CatalogError> {
        request.validate()?;
        let insert = request.prepare_for_insert(acting_user)?;

        let photo = self.photo_repo.create_photo(&insert).await?;

        tracing::info!(photo_id = photo.id, owner = photo.owner, "Photo created");
        Ok(photo)
    }

    /// Fetches a photo the caller is allowed to see.
    pub async fn get_photo(&self, photo_id: i64, acting_user: Option<i64>) -> Result<Photo, CatalogError> {
        let photo = self.find_photo(photo_id).await?;
        if !can_view(Some(&photo), acting_user) {
            return Err(CatalogError::PermissionDenied);
        }
        Ok(photo)
    }

    pub async fn get_photo_with_comments(
        &self,
        photo_id: i64,
        acting_user: Option<i64>,
    ) -> Result<PhotoWithComments, CatalogError> {
        let photo = self.get_photo(photo_id, acting_user).await?;
        let comments = self.list_comments(photo_id).await?;

        Ok(PhotoWithComments { photo, comments })
    }

    /// Applies a partial metadata update. Omitted fields keep their stored value.
    pub async fn update_photo(
        &self,
        photo_id: i64,
        acting_user: Option<i64>,
        patch: UpdatePhotoRequest,
    ) -> Result<PhotoAck, CatalogError> {
        self.find_editable_photo(photo_id, acting_user).await?;

        let changes = patch.into_changes()?;
        if !changes.is_empty() {
            self.persist(photo_id, &changes).await?;
        }

        tracing::info!(photo_id, "Photo updated");
        Ok(PhotoAck::new(photo_id, "Photo updated"))
    }

    /// Adds one tag. Tags form a set, so an exact duplicate is rejected.
    pub async fn add_tag(
        &self,
        photo_id: i64,
        acting_user: Option<i64>,
        tag: &str,
    ) -> Result<PhotoAck, CatalogError> {
        let photo = self.find_editable_photo(photo_id, acting_user).await?;

        let tag = normalize_tag(tag)?;
        if photo.has_tag(&tag) {
            return Err(CatalogError::DuplicateTag(tag));
        }

        let mut tags = photo.tags;
        tags.push(tag);
        let changes = PhotoChanges {
            tags: Some(tags),
            ..PhotoChanges::default()
        };
        self.persist(photo_id, &changes).await?;

        tracing::info!(photo_id, "Tag added");
        Ok(PhotoAck::new(photo_id, "Tag added"))
    }

    /// Posts a comment. Anyone who can view the photo may comment on it.
    pub async fn add_comment(
        &self,
        photo_id: i64,
        acting_user: i64,
        username: &str,
        text: &str,
    ) -> Result<Comment, CatalogError> {
        let request = NewComment::new(text);
        request.validate()?;

        let photo = self.find_photo(photo_id).await?;
        if !can_comment(Some(&photo), Some(acting_user)) {
            tracing::warn!(photo_id, acting_user, "Comment denied");
            return Err(CatalogError::PermissionDenied);
        }

        let insert = request.prepare_for_insert(photo_id, acting_user, username);
        let comment = self.comment_repo.create_comment(&insert).await?;

        tracing::info!(photo_id, comment_id = comment.id, "Comment added");

        if photo.owner != acting_user {
            self.notify_owner(&photo, username);
        }

        Ok(comment)
    }

    /// Comments in creation order. Callers check view rights beforehand.
    pub async fn list_comments(&self, photo_id: i64) -> Result<Vec<Comment>, CatalogError> {
        let mut comments = self.comment_repo.list_comments_for_photo(photo_id).await?;
        sort_in_creation_order(&mut comments);
        Ok(comments)
    }

    /// Photos owned by `owner` that the caller may see.
    pub async fn list_photos_by_owner(
        &self,
        owner: i64,
        acting_user: Option<i64>,
    ) -> Result<Vec<Photo>, CatalogError> {
        let photos = self.photo_repo.get_photos_by_owner(owner).await?;
        Ok(photos
            .into_iter()
            .filter(|p| can_view(Some(p), acting_user))
            .collect())
    }

    fn notify_owner(&self, photo: &Photo, commenter: &str) {
        let Some(notifier) = self.notifier.clone() else {
            return;
        };
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(photo_id = photo.id, "No runtime available, notification skipped");
            return;
        };

        let recipient = photo.owner;
        let photo_id = photo.id;
        let subject = "New comment on your photo".to_string();
        let label = if photo.title.is_empty() { &photo.filename } else { &photo.title };
        let body = format!("{} commented on \"{}\".", commenter, label);

        runtime.spawn(async move {
            if !notifier.notify(recipient, &subject, &body).await {
                tracing::warn!(photo_id, recipient, "Comment notification was not delivered");
            }
        });
    }
}
