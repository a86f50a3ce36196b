pub mod chat;
pub mod detail;
pub mod gallery;
pub mod navbar;
