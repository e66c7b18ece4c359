
use photo_catalog::{
    entities::{album::NewAlbumRequest, photo::Visibility},
    errors::CatalogError,
};
use test_utils::{register_user, test_catalog, upload_photo};

#[tokio::test]
async fn album_view_only_contains_visible_photos() {
    let catalog = test_catalog();
    let owner = register_user(&catalog, "Owner").await;
    let other = register_user(&catalog, "Other").await;
    let album = catalog.albums.create_album(NewAlbumRequest::new("Holiday", "Summer trip")).await.unwrap();

    let open = upload_photo(&catalog, owner.id, "Beach", Visibility::Public).await;
    let hidden = upload_photo(&catalog, owner.id, "Hotel", Visibility::Private).await;
    upload_photo(&catalog, owner.id, "Elsewhere", Visibility::Public).await;
    for photo in [&open, &hidden] {
        catalog.albums.add_photo_to_album(photo.id, Some(owner.id), album.id).await.unwrap();
    }

    let for_other = catalog.albums.get_album_with_visible_photos(album.id, Some(other.id)).await.unwrap();
    let for_owner = catalog.albums.get_album_with_visible_photos(album.id, Some(owner.id)).await.unwrap();

    assert_eq!(for_other.album, album);
    assert_eq!(for_other.photo_count(), 1);
    assert_eq!(for_other.photos[0].id, open.id);
    assert_eq!(for_owner.photo_count(), 2);
}

#[tokio::test]
async fn unknown_album_is_not_found() {
    let catalog = test_catalog();

    let result = catalog.albums.get_album_with_visible_photos(12, None).await;

    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn list_albums_returns_every_album() {
    let catalog = test_catalog();
    catalog.albums.create_album(NewAlbumRequest::new("One", "")).await.unwrap();
    catalog.albums.create_album(NewAlbumRequest::new("Two", "")).await.unwrap();

    let names: Vec<String> = catalog.albums.list_albums().await.unwrap().into_iter().map(|a| a.name).collect();

    assert_eq!(names, vec!["One".to_string(), "Two".to_string()]);
}

#[tokio::test]
async fn album_names_are_looked_up_ignoring_case() {
    let catalog = test_catalog();
    let album = catalog.albums.create_album(NewAlbumRequest::new("Holiday", "")).await.unwrap();

    assert_eq!(catalog.albums.find_album_by_name("HOLIDAY").await.unwrap(), album);
    assert_eq!(catalog.albums.find_album_by_name("holiday").await.unwrap(), album);
    assert!(matches!(
        catalog.albums.find_album_by_name("Holidays").await,
        Err(CatalogError::NotFound(_))
    ));
}

#[tokio::test]
async fn album_names_must_be_unique_and_non_blank() {
    let catalog = test_catalog();
    catalog.albums.create_album(NewAlbumRequest::new("Holiday", "")).await.unwrap();

    assert!(matches!(
        catalog.albums.create_album(NewAlbumRequest::new("holiday", "")).await,
        Err(CatalogError::Conflict(_))
    ));
    assert!(matches!(
        catalog.albums.create_album(NewAlbumRequest::new("  ", "")).await,
        Err(CatalogError::ValidationError(_))
    ));
    assert_eq!(catalog.albums.list_albums().await.unwrap().len(), 1);
}

#[tokio::test]
async fn only_owner_can_place_photo_in_album() {
    let catalog = test_catalog();
    let owner = register_user(&catalog, "Owner").await;
    let other = register_user(&catalog, "Other").await;
    let album = catalog.albums.create_album(NewAlbumRequest::new("Shared", "")).await.unwrap();
    let photo = upload_photo(&catalog, owner.id, "Dock", Visibility::Public).await;

    assert!(matches!(
        catalog.albums.add_photo_to_album(photo.id, Some(other.id), album.id).await,
        Err(CatalogError::PermissionDenied)
    ));
    assert!(matches!(
        catalog.albums.add_photo_to_album(photo.id, Some(owner.id), 404).await,
        Err(CatalogError::NotFound(_))
    ));

    catalog.albums.add_photo_to_album(photo.id, Some(owner.id), album.id).await.unwrap();
    catalog.albums.add_photo_to_album(photo.id, Some(owner.id), album.id).await.unwrap();

    let stored = catalog.photos.get_photo(photo.id, None).await.unwrap();
    assert_eq!(stored.albums, vec![album.id]);
}
