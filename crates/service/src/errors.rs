use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 2001,
            ServiceError::NotFound(_) => 2003,
            ServiceError::Forbidden(_) => 2005,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => 2001,
            ServiceError::Model(models::errors::ModelError::NotFound(_)) => 2003,
            ServiceError::Model(models::errors::ModelError::Conflict(_)) => 2009,
            ServiceError::Db(_) | ServiceError::Model(_) => 2200,
        }
    }
}
