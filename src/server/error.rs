use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::errors::ServiceError;

/// Failure returned by a handler
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// Request could not be interpreted, e.g. a malformed multipart form
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Service(ServiceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Service(ServiceError::Validation(_)) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            ApiError::Service(err) if err.is_client_error() => json!({
                "error": err.error_code(),
                "message": err.to_string(),
            }),
            ApiError::Service(err) => {
                error!("Request failed: {}", err);
                json!({
                    "error": err.error_code(),
                    "message": "Internal server error",
                })
            }
            ApiError::BadRequest(message) => json!({
                "error": "bad_request",
                "message": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EntityKind;

    #[test]
    fn test_status_codes() {
        let not_found: ApiError = ServiceError::not_found(EntityKind::Photo, 1).into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid: ApiError = ServiceError::validation("bad").into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

        let io: ApiError = ServiceError::from(std::io::Error::other("disk full")).into();
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(
            ApiError::bad_request("missing file").status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
