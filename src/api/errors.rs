use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::domain::repositories::RepositoryError;

/// API error type with HTTP status code and message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Creates a new API error
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a 400 Bad Request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Creates a 404 Not Found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Creates a 500 Internal Server Error
    pub fn internal_server_error(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::not_found(format!("Not found: {}", what)),
            other => {
                tracing::error!(error = %other, "Repository failure");
                Self::internal_server_error(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from(RepositoryError::NotFound("team 1".to_string()));

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Not found: team 1");
    }

    #[test]
    fn other_repository_errors_map_to_500() {
        let err = ApiError::from(RepositoryError::NonUniqueResult);

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
