pub mod album;
pub mod comment;
pub mod memory;
pub mod photo;
pub mod sqlx_repo;
pub mod user;
