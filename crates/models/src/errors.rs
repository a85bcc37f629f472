use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self { Self::Db(e.to_string()) }
}

/// Map an insert failure; unique-key violations surface as `Conflict`.
pub fn from_write(e: DbErr) -> ModelError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => ModelError::Conflict(msg),
        _ => ModelError::Db(e.to_string()),
    }
}

/// Reject values wider than their `varchar(max)` column.
pub fn check_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} too long (<={max})")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_len_counts_chars() {
        assert!(check_len("price", &"1".repeat(32), 32).is_ok());
        assert!(matches!(check_len("price", &"1".repeat(33), 32), Err(ModelError::Validation(m)) if m == "price too long (<=32)"));
        assert!(check_len("location", &"é".repeat(255), 255).is_ok());
    }

    #[test]
    fn non_unique_db_errors_stay_db() {
        assert!(matches!(from_write(DbErr::Custom("boom".into())), ModelError::Db(_)));
    }
}
