use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use validator::Validate;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::entities::not_blank;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct UserInsert {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// What callers get back about a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        UserSummary {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[derive(Deserialize, Validate, Zeroize, ZeroizeOnDrop)]
pub struct NewUser {
    #[validate(custom(function = "not_blank", message = "Name cannot be empty"))]
    pub name: String,

    #[validate(custom(function = "not_blank", message = "Email cannot be empty"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>, password: impl Into<String>) -> Self {
        NewUser {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn prepare_for_insert(&self, password_hash: String) -> UserInsert {
        UserInsert {
            name: self.name.trim().to_string(),
            email: self.email.clone(),
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[derive(Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

impl LoginUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginUser {
            email: email.into(),
            password: password.into(),
        }
    }
}
