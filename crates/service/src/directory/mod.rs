//! Business directory: the storefronts customers browse.

pub mod domain;
pub mod repository;
pub mod service;
#[cfg(feature = "seaorm")]
pub mod repo;

pub use service::DirectoryService;
