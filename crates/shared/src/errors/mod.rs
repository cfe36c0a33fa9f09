mod cache;
mod error;
mod http;
mod repository;
mod service;

pub use self::cache::CacheError;
pub use self::error::{ErrorKind, ErrorResponse};
pub use self::http::HttpError;
pub use self::repository::RepositoryError;
pub use self::service::ServiceError;
