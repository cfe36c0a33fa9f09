pub mod address;
pub mod appointment;
pub mod cart;
pub mod category;
pub mod message;
pub mod notification;
pub mod order;
pub mod product;
pub mod review;
pub mod seller_location;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const MAX_PAGE_SIZE: i32 = 100;

pub(crate) fn default_page() -> i32 {
    1
}

pub(crate) fn default_page_size() -> i32 {
    10
}

pub(crate) fn default_true() -> bool {
    true
}

/// `(limit, offset)` for a 1-based page, clamped to sane bounds.
pub fn page_window(page: i32, page_size: i32) -> (i64, i64) {
    let page = page.max(1) as i64;
    let size = page_size.clamp(1, MAX_PAGE_SIZE) as i64;
    (size, (page - 1) * size)
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
pub struct PageRequest {
    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: i32,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "page_size must be between 1 and 100"))]
    pub page_size: i32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

pub(crate) fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("positive").with_message("must be greater than zero".into()))
    }
}

pub(crate) fn non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::new("non_negative").with_message("must not be negative".into()))
    }
}

pub(crate) fn urls(values: &[String]) -> Result<(), ValidationError> {
    if values
        .iter()
        .all(|v| v.starts_with("http://") || v.starts_with("https://") || v.starts_with('/'))
    {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("must be absolute URLs or paths".into()))
    }
}

/// Flattens validator output into `field: message` strings.
pub fn collect_validation_errors(errors: &validator::ValidationErrors) -> Vec<String> {
    let mut out: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                format!("{field}: {message}")
            })
        })
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_clamps() {
        assert_eq!(page_window(1, 10), (10, 0));
        assert_eq!(page_window(3, 20), (20, 40));
        assert_eq!(page_window(0, 0), (1, 0));
        assert_eq!(page_window(2, 1000), (100, 100));
    }
}
