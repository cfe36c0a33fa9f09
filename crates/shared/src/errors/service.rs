use crate::errors::{error::ErrorKind, repository::RepositoryError};
use jsonwebtoken::errors::Error as JwtError;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepositoryError),

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// State conflict carrying a structured list of what was violated.
    #[error("{message}")]
    Rejected { message: String, details: Value },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("JWT error: {0}")]
    Jwt(#[from] JwtError),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid Token")]
    InvalidTokenType,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(vec![message.into()])
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::Forbidden(_) => ErrorKind::Forbidden,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Conflict(_) | ServiceError::Rejected { .. } => ErrorKind::StateConflict,
            ServiceError::Unauthorized(_)
            | ServiceError::Jwt(_)
            | ServiceError::TokenExpired
            | ServiceError::InvalidTokenType => ErrorKind::Unauthenticated,
            ServiceError::Repo(repo) => match repo {
                RepositoryError::NotFound => ErrorKind::NotFound,
                RepositoryError::Conflict(_)
                | RepositoryError::AlreadyExists(_)
                | RepositoryError::ForeignKey(_) => ErrorKind::StateConflict,
                RepositoryError::Sqlx(_) | RepositoryError::Custom(_) => ErrorKind::Internal,
            },
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }
}
