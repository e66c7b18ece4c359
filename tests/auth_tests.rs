
use photo_catalog::{
    entities::user::{LoginUser, NewUser},
    errors::CatalogError,
    repositories::user::UserRepository,
};
use test_utils::test_catalog;

#[tokio::test]
async fn register_returns_summary_without_password() {
    let catalog = test_catalog();

    let user = catalog
        .auth
        .register(NewUser::new("Alice", "a@x.com", "secret"))
        .await
        .unwrap();

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Alice");
    assert_eq!(user.email, "a@x.com");
}

#[tokio::test]
async fn register_stores_hash_not_plaintext() {
    let catalog = test_catalog();
    catalog.auth.register(NewUser::new("Alice", "a@x.com", "secret")).await.unwrap();

    let stored = catalog.store().get_user_by_email("a@x.com").await.unwrap().unwrap();

    assert_ne!(stored.password_hash, "secret");
    assert!(stored.password_hash.starts_with("$argon2id$"));
}

#[tokio::test]
async fn register_assigns_sequential_ids() {
    let catalog = test_catalog();

    let first = catalog.auth.register(NewUser::new("A", "a@x.com", "pw")).await.unwrap();
    let second = catalog.auth.register(NewUser::new("B", "b@x.com", "pw")).await.unwrap();

    assert_eq!(second.id, first.id + 1);
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let catalog = test_catalog();
    catalog.auth.register(NewUser::new("Alice", "a@x.com", "secret")).await.unwrap();

    let result = catalog.auth.register(NewUser::new("Other", "a@x.com", "different")).await;

    assert!(matches!(result, Err(CatalogError::DuplicateEmail)));
}

#[tokio::test]
async fn duplicate_check_is_case_sensitive() {
    let catalog = test_catalog();
    catalog.auth.register(NewUser::new("Alice", "a@x.com", "secret")).await.unwrap();

    let result = catalog.auth.register(NewUser::new("Alice", "A@x.com", "secret")).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn register_rejects_empty_fields() {
    let catalog = test_catalog();

    let cases = [
        NewUser::new("", "a@x.com", "secret"),
        NewUser::new("   ", "a@x.com", "secret"),
        NewUser::new("Alice", "", "secret"),
        NewUser::new("Alice", "a@x.com", ""),
    ];

    for request in cases {
        let result = catalog.auth.register(request).await;
        assert!(matches!(result, Err(CatalogError::ValidationError(_))));
    }

    assert!(catalog.store().get_user_by_email("a@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn login_succeeds_with_correct_password() {
    let catalog = test_catalog();
    let registered = catalog.auth.register(NewUser::new("Alice", "a@x.com", "secret")).await.unwrap();

    let user = catalog.auth.login(LoginUser::new("a@x.com", "secret")).await.unwrap();

    assert_eq!(user, registered);
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let catalog = test_catalog();
    catalog.auth.register(NewUser::new("Alice", "a@x.com", "secret")).await.unwrap();

    let wrong_password = catalog.auth.login(LoginUser::new("a@x.com", "wrong")).await.unwrap_err();
    let unknown_user = catalog.auth.login(LoginUser::new("nobody@x.com", "anything")).await.unwrap_err();

    assert!(matches!(wrong_password, CatalogError::InvalidCredentials));
    assert!(matches!(unknown_user, CatalogError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn get_user_resolves_ids() {
    let catalog = test_catalog();
    let registered = catalog.auth.register(NewUser::new("Alice", "a@x.com", "secret")).await.unwrap();

    assert_eq!(catalog.auth.get_user(registered.id).await.unwrap(), registered);
    assert!(matches!(catalog.auth.get_user(999).await, Err(CatalogError::NotFound(_))));
}
