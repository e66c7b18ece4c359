//! Access decisions for photos.
//!
//! Both predicates are total: an absent photo or an absent acting identity
//! never grants anything, and neither function touches a store.

use crate::entities::photo::{Photo, Visibility};

/// Public photos are visible to everyone. Private photos only to their owner.
pub fn can_view(photo: Option<&Photo>, acting_user: Option<i64>) -> bool {
    match photo {
        None => false,
        Some(photo) => match photo.visibility {
            Visibility::Public => true,
            Visibility::Private => is_owner(photo, acting_user),
        },
    }
}

/// Ownership is the only gate for edits; visibility plays no part.
pub fn can_edit(photo: Option<&Photo>, acting_user: Option<i64>) -> bool {
    photo.is_some_and(|photo| is_owner(photo, acting_user))
}

/// Commenting follows view rights.
pub fn can_comment(photo: Option<&Photo>, acting_user: Option<i64>) -> bool {
    can_view(photo, acting_user)
}

fn is_owner(photo: &Photo, acting_user: Option<i64>) -> bool {
    acting_user == Some(photo.owner)
}
