use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use caregate_application::{AuthFailure, AuthResult};

/// Errors surfaced by routes outside the `AuthResult` transport shape.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("Missing or invalid access token")]
    Unauthenticated,
    #[error("Access denied")]
    Forbidden,
    #[error("{0}")]
    NotFound(String),
    #[error("Something went wrong")]
    Unexpected(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unexpected(detail) => {
                tracing::error!(%detail, "Unexpected error while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = self.to_string();
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Maps an `AuthResult` to a response, deriving the status code from the
/// failure tag. The serialized body is the result itself in both directions.
pub fn auth_result_response(result: AuthResult, success_status: StatusCode) -> Response {
    let status = if result.is_success() {
        success_status
    } else {
        result
            .failure
            .as_ref()
            .map(status_for)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    };

    (status, Json(result)).into_response()
}

fn status_for(failure: &AuthFailure) -> StatusCode {
    match failure {
        AuthFailure::AlreadyExists => StatusCode::CONFLICT,
        AuthFailure::WeakCredential(_) => StatusCode::BAD_REQUEST,
        AuthFailure::InvalidCredentials
        | AuthFailure::InvalidToken
        | AuthFailure::UserNotFound
        | AuthFailure::InvalidRequest
        | AuthFailure::Expired
        | AuthFailure::InvalidCode => StatusCode::UNAUTHORIZED,
        AuthFailure::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_for_duplicate_registration() {
        let response = auth_result_response(
            AuthResult::failed(AuthFailure::AlreadyExists),
            StatusCode::CREATED,
        );
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_success_uses_the_given_status() {
        let response = auth_result_response(
            AuthResult::succeeded("token".to_string()),
            StatusCode::CREATED,
        );
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_credential_failures_are_unauthorized() {
        for failure in [
            AuthFailure::InvalidCredentials,
            AuthFailure::InvalidToken,
            AuthFailure::InvalidRequest,
            AuthFailure::Expired,
            AuthFailure::InvalidCode,
        ] {
            let response = auth_result_response(AuthResult::failed(failure), StatusCode::OK);
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
