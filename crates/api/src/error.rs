// error.rs - typed outcomes of record operations and their HTTP mapping

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use database::StoreError;
use serde_json::json;
use thiserror::Error;

/// Everything a record operation can end with besides success.
///
/// `NoRecord` and `NotModified` are expected outcomes and are answered with a
/// `success=false` envelope; the others are infrastructure failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("MongoDB not connected")]
    NotConnected,
    #[error("Connection error: {0}")]
    Unreachable(StoreError),
    #[error("no record found in the collection")]
    NoRecord,
    #[error("no document was modified")]
    NotModified,
    #[error("Internal error: {0}")]
    Store(#[from] StoreError),
}

/// Failure responses. Bodies are `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    InvalidBody(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotConnected | ServiceError::Unreachable(_) => {
                ApiError::Unavailable(err.to_string())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "detail": self.to_string() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infrastructure_failures_map_to_status() {
        let not_connected: ApiError = ServiceError::NotConnected.into();
        assert_eq!(not_connected.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let unreachable: ApiError =
            ServiceError::Unreachable(StoreError::Unavailable("timeout".into())).into();
        assert_eq!(unreachable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            unreachable.to_string(),
            "Connection error: store unavailable: timeout"
        );

        let store: ApiError = ServiceError::Store(StoreError::Unavailable("boom".into())).into();
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.to_string(), "Internal error: store unavailable: boom");
    }
}
