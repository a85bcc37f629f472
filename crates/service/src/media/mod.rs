//! Uploaded service images.

pub mod store;
pub mod service;

pub use service::MediaService;
pub use store::{LocalObjectStore, ObjectStore};
