use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Shape of every failure body the API produces.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API-wide failure taxonomy. Each variant carries the client-visible
/// message; the status code comes from the variant alone, so credential
/// problems and missing resources can never share a status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("Authorization token required")]
    AuthRequired,
    #[error("Invalid or expired token")]
    InvalidCredential,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("{0} already exists")]
    Conflict(&'static str),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
    #[error("Not Found")]
    RouteNotFound,
    #[error("Internal Server Error: {0}")]
    Upstream(anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::AuthRequired | ApiError::InvalidCredential | ApiError::IncorrectPassword => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Upstream(e)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Upstream(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_match_taxonomy() {
        assert_eq!(
            ApiError::Validation("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::AuthRequired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::InvalidCredential.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::Conflict("Username").status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::NotFound("Blog").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden("nope").status(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::RouteNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn messages_render_resource_names() {
        assert_eq!(ApiError::NotFound("Blog").to_string(), "Blog not found");
        assert_eq!(
            ApiError::Conflict("Username").to_string(),
            "Username already exists"
        );
        assert_eq!(ApiError::RouteNotFound.to_string(), "Not Found");
    }
}
