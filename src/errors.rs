use std::borrow::Cow;
use std::fmt;

use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug)]
pub enum CatalogError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    PermissionDenied,
    DuplicateEmail,
    DuplicateTag(String),
    Conflict(String),
    InvalidCredentials,
    InternalError(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}:{}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            CatalogError::NotFound(msg) => write!(f, "Not found: {}", msg),
            CatalogError::PermissionDenied => write!(f, "Permission denied"),
            CatalogError::DuplicateEmail => write!(f, "A user with this email already exists"),
            CatalogError::DuplicateTag(tag) => write!(f, "Tag already present: {}", tag),
            CatalogError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            CatalogError::InvalidCredentials => write!(f, "Wrong credentials"),
            CatalogError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl CatalogError {
    /// Builds a single-field validation error.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        CatalogError::ValidationError(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    /// Only store and hashing failures are unexpected; every other kind is an expected outcome.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CatalogError::InternalError(_))
    }
}

impl From<ValidationErrors> for CatalogError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();

        field_errors.sort_by(|a, b| a.field.cmp(&b.field));
        CatalogError::ValidationError(field_errors)
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                CatalogError::Conflict("Database conflict occurred".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                CatalogError::Conflict("Foreign key violation".into())
            }
            _ => CatalogError::InternalError(format!("Database error: {}", err))
        }
    }
}

impl From<sqlx::migrate::MigrateError> for CatalogError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        CatalogError::InternalError(format!("Migration failed: {}", err))
    }
}

impl From<PasswordError> for CatalogError {
    fn from(err: PasswordError) -> Self {
        CatalogError::InternalError(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}
