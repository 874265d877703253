pub mod catalog;
pub mod error;
pub mod favorites;
pub mod library;
pub mod mime;
pub mod store;
pub mod upload;
