use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{not_blank, photo::Photo};

const MAX_COMMENT_LENGTH: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub id: i64,
    pub photo_id: i64,
    pub user_id: i64,
    /// Name at the time of posting, not kept in sync with the user record.
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CommentInsert {
    pub photo_id: i64,
    pub user_id: i64,
    pub username: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NewComment {
    #[validate(
        length(max = MAX_COMMENT_LENGTH, message = "Comment is too long"),
        custom(function = "not_blank", message = "Comment cannot be empty")
    )]
    pub text: String,
}

impl NewComment {
    pub fn new(text: impl Into<String>) -> Self {
        NewComment { text: text.into() }
    }

    pub fn prepare_for_insert(&self, photo_id: i64, user_id: i64, username: &str) -> CommentInsert {
        CommentInsert {
            photo_id,
            user_id,
            username: username.to_string(),
            text: self.text.trim().to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Creation order: ascending timestamp, ties broken by id.
pub fn sort_in_creation_order(comments: &mut [Comment]) {
    comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
}

/// A photo page: the photo plus its comments in creation order.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoWithComments {
    pub photo: Photo,
    pub comments: Vec<Comment>,
}
