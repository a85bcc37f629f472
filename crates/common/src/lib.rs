//! Shared building blocks for the AutoEase workspace: logging setup,
//! runtime directory checks, pagination and the outbound SMS client.

pub mod types;
pub mod utils;
pub mod pagination;
pub mod env;
pub mod sms;
