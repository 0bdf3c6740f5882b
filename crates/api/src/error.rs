use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use foster_directory_core::canonical::CanonicalSlugError;
use foster_directory_core::StoreError;
use serde_json::json;

/// API error type rendered as `{"error": {type, message, statusCode}}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Database(err) => ApiError::Database(err),
            StoreError::RowNotFound { .. } => ApiError::NotFound(err.to_string()),
            StoreError::Unavailable(_) => ApiError::Unavailable(err.to_string()),
            StoreError::ColumnMissing(_) | StoreError::RelationshipNotEmbeddable(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<CanonicalSlugError> for ApiError {
    fn from(err: CanonicalSlugError) -> Self {
        match err {
            CanonicalSlugError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            CanonicalSlugError::Store(err) => err.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "notFound", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "badRequest", msg.clone()),
            ApiError::Unavailable(msg) => {
                tracing::warn!("Store unavailable: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "serviceUnavailable",
                    "The directory store is unavailable".to_string(),
                )
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                tracing::error!("Database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internalError",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": {
                "type": error_type,
                "message": message,
                "statusCode": status.as_u16(),
            }
        });

        (status, Json(body)).into_response()
    }
}

/// Convenience type alias for route handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use foster_directory_core::LocationType;

    #[test]
    fn domain_errors_map_to_statuses() {
        let missing: ApiError = CanonicalSlugError::NotFound {
            location_type: LocationType::City,
            id: "x".into(),
        }
        .into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let down: ApiError = StoreError::Unavailable("cities".into()).into();
        assert_eq!(down.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let row: ApiError = StoreError::RowNotFound {
            table: "regions",
            id: "r1".into(),
        }
        .into();
        assert!(matches!(row, ApiError::NotFound(_)));
    }
}
