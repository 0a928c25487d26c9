use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Error taxonomy for the HTTP layer. Every handler failure is one of
/// these; storage and unexpected failures render as a generic message.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Server error")]
    Database(#[from] sqlx::Error),

    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Database(err) => {
                tracing::error!(error = %err, "database error");
            }
            Self::Internal(err) => {
                tracing::error!(error = %err, "internal error");
            }
            _ => {}
        }

        let body = json!({ "error": self.to_string() });

        (self.status_code(), Json(body)).into_response()
    }
}

pub trait ResultExt<T> {
    /// Remaps a unique-constraint violation on `name` to the given error.
    fn on_constraint(self, name: &str, api: ApiError) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn on_constraint(self, name: &str, api: ApiError) -> Result<T, ApiError> {
        self.map_err(|err| match err.into() {
            ApiError::Database(err)
                if err.as_database_error().and_then(|e| e.constraint()) == Some(name) =>
            {
                api
            }
            err => err,
        })
    }
}
