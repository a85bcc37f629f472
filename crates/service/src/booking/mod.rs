//! Booking requests and their status lifecycle.
//!
//! A request starts `pending` and unpaid. The owning business moves it to
//! `accepted` or `rejected`; the customer flips `paid` on. Writes are plain
//! overwrites, so concurrent updates resolve as last writer wins.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
#[cfg(feature = "seaorm")]
pub mod repo;

pub use domain::{BookingPolicy, RequestStatus};
pub use service::BookingService;
