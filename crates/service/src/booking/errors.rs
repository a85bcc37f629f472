use thiserror::Error;

use crate::auth::errors::AuthError;
use crate::errors::ServiceError;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl BookingError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            BookingError::Validation(_) => 3001,
            BookingError::NotFound(_) => 3003,
            BookingError::Forbidden(_) => 3005,
            BookingError::InvalidTransition(_) => 3009,
            BookingError::Repository(_) => 3200,
        }
    }
}

impl From<models::errors::ModelError> for BookingError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(msg) => BookingError::Validation(msg),
            models::errors::ModelError::NotFound(msg) => BookingError::NotFound(msg),
            models::errors::ModelError::Conflict(msg) => BookingError::InvalidTransition(msg),
            models::errors::ModelError::Db(msg) => BookingError::Repository(msg),
        }
    }
}

impl From<ServiceError> for BookingError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => BookingError::Validation(msg),
            ServiceError::NotFound(msg) => BookingError::NotFound(msg),
            ServiceError::Forbidden(msg) => BookingError::Forbidden(msg),
            ServiceError::Db(msg) => BookingError::Repository(msg),
            ServiceError::Model(m) => m.into(),
        }
    }
}

impl From<AuthError> for BookingError {
    fn from(e: AuthError) -> Self {
        BookingError::Repository(e.to_string())
    }
}
