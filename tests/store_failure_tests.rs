use async_trait::async_trait;
use chrono::Utc;
use mockall::{mock, predicate::eq};
use photo_catalog::{
    entities::{
        comment::{Comment, CommentInsert},
        photo::{Photo, PhotoChanges, PhotoInsert, UpdatePhotoRequest, Visibility},
    },
    errors::CatalogError,
    repositories::{comment::CommentRepository, memory::MemoryRepo, photo::PhotoRepository},
    use_cases::{photos::PhotoHandler, search::SearchHandler},
    MemoryCatalog,
};

mock! {
    pub PhotoRepo {}

    #[async_trait]
    impl PhotoRepository for PhotoRepo {
        async fn create_photo(&self, photo: &PhotoInsert) -> Result<Photo, CatalogError>;
        async fn get_photo_by_id(&self, id: i64) -> Result<Option<Photo>, CatalogError>;
        async fn update_photo_fields(&self, id: i64, changes: &PhotoChanges) -> Result<bool, CatalogError>;
        async fn get_photos_in_album(&self, album_id: i64) -> Result<Vec<Photo>, CatalogError>;
        async fn get_photos_by_owner(&self, owner: i64) -> Result<Vec<Photo>, CatalogError>;
        async fn search_photos(&self, query: &str) -> Result<Vec<Photo>, CatalogError>;
    }
}

mock! {
    pub CommentRepo {}

    #[async_trait]
    impl CommentRepository for CommentRepo {
        async fn create_comment(&self, comment: &CommentInsert) -> Result<Comment, CatalogError>;
        async fn list_comments_for_photo(&self, photo_id: i64) -> Result<Vec<Comment>, CatalogError>;
    }
}

fn private_photo(id: i64, owner: i64) -> Photo {
    Photo {
        id,
        filename: "p.jpg".into(),
        title: "Lake".into(),
        description: String::new(),
        tags: vec!["sunset".into()],
        albums: Vec::new(),
        visibility: Visibility::Private,
        owner,
        date: Utc::now(),
    }
}

#[tokio::test]
async fn denied_update_never_writes() {
    let mut photos = MockPhotoRepo::new();
    photos
        .expect_get_photo_by_id()
        .with(eq(5))
        .returning(|id| Ok(Some(private_photo(id, 7))));
    photos.expect_update_photo_fields().never();

    let handler = PhotoHandler::new(photos, MockCommentRepo::new());
    let result = handler.update_photo(5, Some(9), UpdatePhotoRequest::default().title("x")).await;

    assert!(matches!(result, Err(CatalogError::PermissionDenied)));
}

#[tokio::test]
async fn allowed_update_writes_only_present_fields() {
    let mut photos = MockPhotoRepo::new();
    photos
        .expect_get_photo_by_id()
        .returning(|id| Ok(Some(private_photo(id, 7))));
    photos
        .expect_update_photo_fields()
        .withf(|id, changes| {
            *id == 5
                && changes.visibility == Some(Visibility::Public)
                && changes.title.is_none()
                && changes.description.is_none()
                && changes.tags.is_none()
        })
        .times(1)
        .returning(|_, _| Ok(true));

    let handler = PhotoHandler::new(photos, MockCommentRepo::new());
    let ack = handler
        .update_photo(5, Some(7), UpdatePhotoRequest::default().visibility("public"))
        .await
        .unwrap();

    assert_eq!(ack.id, 5);
}

#[tokio::test]
async fn duplicate_tag_never_writes() {
    let mut photos = MockPhotoRepo::new();
    photos
        .expect_get_photo_by_id()
        .returning(|id| Ok(Some(private_photo(id, 7))));
    photos.expect_update_photo_fields().never();

    let handler = PhotoHandler::new(photos, MockCommentRepo::new());
    let result = handler.add_tag(5, Some(7), " sunset ").await;

    assert!(matches!(result, Err(CatalogError::DuplicateTag(_))));
}

#[tokio::test]
async fn denied_comment_never_writes() {
    let mut photos = MockPhotoRepo::new();
    photos
        .expect_get_photo_by_id()
        .returning(|id| Ok(Some(private_photo(id, 7))));
    let mut comments = MockCommentRepo::new();
    comments.expect_create_comment().never();

    let handler = PhotoHandler::new(photos, comments);
    let result = handler.add_comment(5, 9, "mallory", "hi").await;

    assert!(matches!(result, Err(CatalogError::PermissionDenied)));
}

#[tokio::test]
async fn store_failures_surface_as_fatal_errors() {
    let mut photos = MockPhotoRepo::new();
    photos
        .expect_search_photos()
        .returning(|_| Err(CatalogError::InternalError("connection reset".into())));

    let handler = SearchHandler::new(photos);
    let err = handler.search("lake", Some(1)).await.unwrap_err();

    assert!(err.is_fatal());
}

#[tokio::test]
async fn search_rechecks_visibility_of_store_candidates() {
    let mut photos = MockPhotoRepo::new();
    photos
        .expect_search_photos()
        .with(eq("lake"))
        .returning(|_| Ok(vec![private_photo(1, 7), private_photo(2, 9)]));

    let handler = SearchHandler::new(photos);
    let results = handler.search("lake", Some(9)).await.unwrap();

    assert_eq!(results.iter().map(|p| p.id).collect::<Vec<_>>(), vec![2]);
}

#[tokio::test]
async fn closed_store_rejects_calls() {
    let store = MemoryRepo::open();
    let catalog = MemoryCatalog::new(store.clone(), None);
    catalog.close().await;

    let err = store.get_photo_by_id(1).await.unwrap_err();

    assert!(err.is_fatal());
    assert!(store.check_connection().await.is_err());
}
