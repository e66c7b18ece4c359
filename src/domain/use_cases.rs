pub mod albums;
pub mod auth;
pub mod photos;
pub mod search;
