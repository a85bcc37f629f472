//! Domain layer for the AutoEase marketplace.
//!
//! Each area pairs a repository trait (SeaORM-backed behind the `seaorm`
//! feature, in-memory under `mock`) with a service that holds the rules.

pub mod errors;
pub mod auth;
pub mod directory;
pub mod catalog;
pub mod booking;
pub mod media;
