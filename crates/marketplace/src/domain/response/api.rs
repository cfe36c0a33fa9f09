use crate::domain::response::pagination::Pagination;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl<T: fmt::Debug> fmt::Display for ApiResponse<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ApiResponse {{ success: {}, message: {}, data: {:?} }}",
            self.success, self.message, self.data
        )
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct ApiResponsePagination<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    pub pagination: Pagination,
}

impl<T> ApiResponsePagination<T> {
    pub fn ok(message: impl Into<String>, data: T, pagination: Pagination) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            pagination,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct CountResponse {
    pub affected_count: u64,
}
