use validator::Validate;

use crate::auth::password::{hash_password, verify_against_dummy, verify_password};
use crate::entities::user::{LoginUser, NewUser, UserSummary};
use crate::errors::CatalogError;
use crate::repositories::user::UserRepository;

pub struct AuthHandler<R>
where
    R: UserRepository,
{
    pub user_repo: R,
}

impl<R> AuthHandler<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: R) -> Self {
        AuthHandler { user_repo }
    }

    /// Registers a new user after validation and password hashing
    pub async fn register(&self, request: NewUser) -> Result<UserSummary, CatalogError> {
        request.validate()?;

        if self.user_repo.get_user_by_email(&request.email).await?.is_some() {
            return Err(CatalogError::DuplicateEmail);
        }

        let hashed_password = hash_password(&request.password)?;
        let user_insert = request.prepare_for_insert(hashed_password);

        let user = self.user_repo.create_user(&user_insert).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(UserSummary::from(user))
    }

    /// Verifies credentials. Unknown email and wrong password fail identically.
    pub async fn login(&self, request: LoginUser) -> Result<UserSummary, CatalogError> {
        let Some(user) = self.user_repo.get_user_by_email(&request.email).await? else {
            verify_against_dummy(&request.password);
            return Err(CatalogError::InvalidCredentials);
        };

        let is_password_valid = verify_password(&request.password, &user.password_hash)
            .map_err(|e| {
                tracing::warn!(user_id = user.id, "Stored password hash unusable: {}", e);
                CatalogError::InvalidCredentials
            })?;
        if !is_password_valid {
            return Err(CatalogError::InvalidCredentials);
        }

        tracing::info!(user_id = user.id, "User logged in successfully");
        Ok(UserSummary::from(user))
    }

    /// Resolves an id to a user summary.
    pub async fn get_user(&self, user_id: i64) -> Result<UserSummary, CatalogError> {
        self.user_repo
            .get_user_by_id(user_id)
            .await?
            .map(UserSummary::from)
            .ok_or_else(|| CatalogError::NotFound("User not found".to_string()))
    }
}
