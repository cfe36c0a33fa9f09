mod address;
mod appointment;
mod cart;
mod category;
mod dashboard;
mod message;
mod notification;
mod notifier;
mod order;
mod product;
mod review;
mod seller_location;

pub use self::address::AddressService;
pub use self::appointment::AppointmentService;
pub use self::cart::CartService;
pub use self::category::CategoryService;
pub use self::dashboard::DashboardService;
pub use self::message::MessageService;
pub use self::notification::NotificationService;
pub use self::notifier::InAppNotifier;
pub use self::order::{OrderService, OrderServiceConfig};
pub use self::product::ProductService;
pub use self::review::ReviewService;
pub use self::seller_location::SellerLocationService;

use crate::domain::{
    actor::{Actor, Role},
    lifecycle::TransitionError,
    requests::collect_validation_errors,
};
use shared::errors::ServiceError;
use validator::Validate;

pub(crate) fn validate_request<T: Validate>(req: &T) -> Result<(), ServiceError> {
    req.validate()
        .map_err(|errors| ServiceError::Validation(collect_validation_errors(&errors)))
}

pub(crate) fn require_role(actor: &Actor, role: Role, action: &str) -> Result<(), ServiceError> {
    if actor.has_role(role) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!("only {role:?} accounts can {action}").to_lowercase()))
    }
}

pub(crate) fn found<T>(value: Option<T>, what: &str) -> Result<T, ServiceError> {
    value.ok_or_else(|| ServiceError::NotFound(format!("{what} not found")))
}

/// Missing edges are state conflicts; edges the caller may not take are 403.
pub(crate) fn transition_denied(err: TransitionError) -> ServiceError {
    match err {
        TransitionError::Invalid { .. } => ServiceError::Conflict(err.to_string()),
        TransitionError::NotPermitted { .. } => ServiceError::Forbidden(err.to_string()),
    }
}
