//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Signup, login and the session context handed to every other service.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod token;
#[cfg(feature = "seaorm")]
pub mod repo;

pub use domain::{AuthContext, Role};
pub use service::AuthService;
