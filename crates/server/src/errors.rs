use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::booking::errors::BookingError;
use service::errors::ServiceError;

/// JSON error body returned by every handler.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: String,
    pub detail: Option<String>,
    /// Stable numeric code of the underlying domain error.
    pub code: Option<u16>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, title: title.into(), detail, code: None }
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(detail.into()))
    }

    fn with_code(mut self, code: u16) -> Self {
        self.code = Some(code);
        self
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, title = %self.title, detail = ?self.detail, "request failed");
        }
        let body = serde_json::json!({
            "status": self.status.as_u16(),
            "title": self.title,
            "detail": self.detail,
            "code": self.code,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        let (status, title) = match &e {
            AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            AuthError::Conflict => (StatusCode::CONFLICT, "Conflict"),
            AuthError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            AuthError::Unauthorized | AuthError::TokenError(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AuthError::HashError(_) | AuthError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };
        JsonApiError::new(status, title, Some(e.to_string())).with_code(e.code())
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        use models::errors::ModelError;
        let (status, title) = match &e {
            ServiceError::Validation(_) | ServiceError::Model(ModelError::Validation(_)) => (StatusCode::BAD_REQUEST, "Validation Error"),
            ServiceError::NotFound(_) | ServiceError::Model(ModelError::NotFound(_)) => (StatusCode::NOT_FOUND, "Not Found"),
            ServiceError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            ServiceError::Model(ModelError::Conflict(_)) => (StatusCode::CONFLICT, "Conflict"),
            ServiceError::Db(_) | ServiceError::Model(ModelError::Db(_)) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };
        JsonApiError::new(status, title, Some(e.to_string())).with_code(e.code())
    }
}

impl From<BookingError> for JsonApiError {
    fn from(e: BookingError) -> Self {
        let (status, title) = match &e {
            BookingError::Validation(_) => (StatusCode::BAD_REQUEST, "Validation Error"),
            BookingError::NotFound(_) => (StatusCode::NOT_FOUND, "Not Found"),
            BookingError::Forbidden(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            BookingError::InvalidTransition(_) => (StatusCode::CONFLICT, "Invalid Transition"),
            BookingError::Repository(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Error"),
        };
        JsonApiError::new(status, title, Some(e.to_string())).with_code(e.code())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_http_status() {
        assert_eq!(JsonApiError::from(AuthError::Conflict).status, StatusCode::CONFLICT);
        assert_eq!(JsonApiError::from(ServiceError::Forbidden("x".into())).status, StatusCode::FORBIDDEN);
        let e = JsonApiError::from(BookingError::InvalidTransition("x".into()));
        assert_eq!(e.status, StatusCode::CONFLICT);
        assert_eq!(e.code, Some(3009));
        assert_eq!(JsonApiError::from(BookingError::Repository("x".into())).status, StatusCode::INTERNAL_SERVER_ERROR);
        let dup = JsonApiError::from(ServiceError::Model(models::errors::ModelError::Conflict("business_pkey".into())));
        assert_eq!(dup.status, StatusCode::CONFLICT);
        assert_eq!(dup.code, Some(2009));
        let too_long = JsonApiError::from(ServiceError::Model(models::errors::ModelError::Validation("price too long (<=32)".into())));
        assert_eq!(too_long.status, StatusCode::BAD_REQUEST);
    }
}
