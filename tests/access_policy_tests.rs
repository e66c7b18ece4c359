
use photo_catalog::{
    entities::photo::Visibility,
    policy::{can_comment, can_edit, can_view},
};
use test_utils::photo_record;

#[test]
fn private_photo_is_visible_only_to_owner() {
    let photo = photo_record(5, 7, Visibility::Private);

    assert!(can_view(Some(&photo), Some(7)));
    assert!(!can_view(Some(&photo), Some(9)));
    assert!(!can_view(Some(&photo), None));
}

#[test]
fn public_photo_is_visible_to_everyone() {
    let photo = photo_record(1, 7, Visibility::Public);

    for user in [Some(7), Some(8), Some(1_000), None] {
        assert!(can_view(Some(&photo), user));
    }
}

#[test]
fn edit_rights_follow_ownership_regardless_of_visibility() {
    for visibility in [Visibility::Public, Visibility::Private] {
        let photo = photo_record(1, 7, visibility);

        assert!(can_edit(Some(&photo), Some(7)));
        assert!(!can_edit(Some(&photo), Some(8)));
        assert!(!can_edit(Some(&photo), None));
    }
}

#[test]
fn missing_photo_grants_nothing() {
    assert!(!can_view(None, Some(7)));
    assert!(!can_edit(None, Some(7)));
    assert!(!can_comment(None, Some(7)));
    assert!(!can_view(None, None));
}

#[test]
fn comment_rights_derive_from_view_rights() {
    let private = photo_record(1, 7, Visibility::Private);
    let public = photo_record(2, 7, Visibility::Public);

    assert!(can_comment(Some(&private), Some(7)));
    assert!(!can_comment(Some(&private), Some(9)));
    assert!(can_comment(Some(&public), Some(9)));
}

#[test]
fn visibility_parsing_rejects_unknown_values() {
    assert_eq!("public".parse::<Visibility>().unwrap(), Visibility::Public);
    assert_eq!("private".parse::<Visibility>().unwrap(), Visibility::Private);

    for raw in ["Public", "friends", "", " private"] {
        assert!(raw.parse::<Visibility>().is_err(), "{raw:?} should be rejected");
    }
}
