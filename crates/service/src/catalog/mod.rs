//! Catalog: the wash and rental services each business offers.

pub mod domain;
pub mod repository;
pub mod service;
#[cfg(feature = "seaorm")]
pub mod repo;

pub use service::CatalogService;
