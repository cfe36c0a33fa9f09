use crate::errors::{
    error::{ErrorKind, ErrorResponse},
    repository::RepositoryError,
    service::ServiceError,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use tracing::error;

#[derive(Debug)]
pub enum HttpError {
    BadRequest {
        message: String,
        errors: Option<Value>,
    },
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    UnprocessableEntity {
        message: String,
        errors: Option<Value>,
    },
    Internal(String),
}

impl From<ServiceError> for HttpError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(errors) => HttpError::UnprocessableEntity {
                message: errors.join("; "),
                errors: Some(json!(errors)),
            },

            ServiceError::Forbidden(msg) => HttpError::Forbidden(msg),

            ServiceError::NotFound(msg) => HttpError::NotFound(msg),

            ServiceError::Conflict(msg) => HttpError::BadRequest {
                message: msg,
                errors: None,
            },

            ServiceError::Rejected { message, details } => HttpError::BadRequest {
                message,
                errors: Some(details),
            },

            ServiceError::Repo(repo_err) => match repo_err {
                RepositoryError::NotFound => HttpError::NotFound("Not found".into()),
                RepositoryError::Conflict(msg) | RepositoryError::AlreadyExists(msg) => {
                    HttpError::BadRequest {
                        message: msg,
                        errors: None,
                    }
                }
                RepositoryError::ForeignKey(msg) => HttpError::BadRequest {
                    message: format!("Foreign key violation: {msg}"),
                    errors: None,
                },
                other => {
                    error!("❌ Repository failure: {other:?}");
                    HttpError::Internal("Internal server error".into())
                }
            },

            ServiceError::Unauthorized(msg) => HttpError::Unauthorized(msg),

            ServiceError::Jwt(err) => HttpError::Unauthorized(format!("JWT error: {err}")),

            ServiceError::TokenExpired => HttpError::Unauthorized("Token expired".into()),

            ServiceError::InvalidTokenType => HttpError::Unauthorized("Invalid token type".into()),

            ServiceError::Internal(msg) => {
                error!("❌ Internal failure: {msg}");
                HttpError::Internal("Internal server error".into())
            }
        }
    }
}

impl HttpError {
    fn parts(self) -> (StatusCode, ErrorResponse) {
        match self {
            HttpError::BadRequest { message, errors } => (
                StatusCode::BAD_REQUEST,
                with_errors(ErrorResponse::new(ErrorKind::StateConflict, message), errors),
            ),
            HttpError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new(ErrorKind::Unauthenticated, msg),
            ),
            HttpError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                ErrorResponse::new(ErrorKind::Forbidden, msg),
            ),
            HttpError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorKind::NotFound, msg),
            ),
            HttpError::UnprocessableEntity { message, errors } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                with_errors(ErrorResponse::new(ErrorKind::Validation, message), errors),
            ),
            HttpError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(ErrorKind::Internal, msg),
            ),
        }
    }
}

fn with_errors(body: ErrorResponse, errors: Option<Value>) -> ErrorResponse {
    match errors {
        Some(errors) => body.with_errors(errors),
        None => body,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_become_unprocessable() {
        let err = HttpError::from(ServiceError::validation("rating: must be between 1 and 5"));
        let (status, body) = err.parts();

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.kind, ErrorKind::Validation);
        assert!(!body.success);
        assert_eq!(body.message, "rating: must be between 1 and 5");
    }

    #[test]
    fn rejected_keeps_structured_details() {
        let details = json!([{ "product_id": 7, "reason": "insufficient_stock" }]);
        let err = HttpError::from(ServiceError::Rejected {
            message: "Some items are invalid".into(),
            details: details.clone(),
        });
        let (status, body) = err.parts();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.kind, ErrorKind::StateConflict);
        assert_eq!(body.errors, Some(details));
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let err = HttpError::from(ServiceError::Internal("pool exhausted".into()));
        let (status, body) = err.parts();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Internal server error");
    }

    #[test]
    fn repository_not_found_is_404() {
        let err = HttpError::from(ServiceError::Repo(RepositoryError::NotFound));
        assert_eq!(err.parts().0, StatusCode::NOT_FOUND);
    }
}
