use validator::ValidationError;

pub mod album;
pub mod comment;
pub mod photo;
pub mod user;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
