//! Allowed status transitions for orders and appointments, and which
//! participant may request each edge.

use crate::domain::enums::{AppointmentStatus, OrderStatus};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("invalid status transition from {from} to {to}")]
    Invalid { from: String, to: String },

    #[error("you are not allowed to change the status to {to}")]
    NotPermitted { to: String },
}

impl OrderStatus {
    pub const fn allowed_transitions(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Waiting => &[OrderStatus::Processing, OrderStatus::Canceled],
            OrderStatus::Processing => &[OrderStatus::Shipped, OrderStatus::Canceled],
            OrderStatus::Shipped => &[OrderStatus::Completed],
            // never entered by checkout; payments are tracked on payment_status
            OrderStatus::Paid => &[],
            OrderStatus::Completed | OrderStatus::Canceled => &[],
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

/// How the caller relates to an order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderParticipation {
    pub is_buyer: bool,
    pub is_seller: bool,
    pub is_admin: bool,
}

impl OrderParticipation {
    pub fn is_involved(&self) -> bool {
        self.is_buyer || self.is_seller || self.is_admin
    }

    pub fn may_request(&self, target: OrderStatus) -> bool {
        match target {
            OrderStatus::Processing | OrderStatus::Shipped => self.is_seller || self.is_admin,
            OrderStatus::Completed => self.is_buyer,
            OrderStatus::Canceled => self.is_involved(),
            OrderStatus::Waiting | OrderStatus::Paid => false,
        }
    }
}

/// The edge must exist in the table before the caller's right to take it
/// is considered.
pub fn check_order_transition(
    current: OrderStatus,
    target: OrderStatus,
    participation: OrderParticipation,
) -> Result<(), TransitionError> {
    if !current.can_transition_to(target) {
        return Err(TransitionError::Invalid {
            from: current.to_string(),
            to: target.to_string(),
        });
    }

    if !participation.may_request(target) {
        return Err(TransitionError::NotPermitted {
            to: target.to_string(),
        });
    }

    Ok(())
}

impl AppointmentStatus {
    pub const fn allowed_transitions(&self) -> &'static [AppointmentStatus] {
        match self {
            AppointmentStatus::Waiting => {
                &[AppointmentStatus::Confirmed, AppointmentStatus::Canceled]
            }
            AppointmentStatus::Confirmed => {
                &[AppointmentStatus::Completed, AppointmentStatus::Canceled]
            }
            AppointmentStatus::Completed | AppointmentStatus::Canceled => &[],
        }
    }

    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_terminal(&self) -> bool {
        self.allowed_transitions().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentParty {
    Buyer,
    Seller,
}

impl AppointmentParty {
    pub fn may_request(&self, target: AppointmentStatus) -> bool {
        match self {
            AppointmentParty::Seller => matches!(
                target,
                AppointmentStatus::Confirmed
                    | AppointmentStatus::Completed
                    | AppointmentStatus::Canceled
            ),
            AppointmentParty::Buyer => matches!(
                target,
                AppointmentStatus::Canceled | AppointmentStatus::Completed
            ),
        }
    }
}

pub fn check_appointment_transition(
    current: AppointmentStatus,
    target: AppointmentStatus,
    party: AppointmentParty,
) -> Result<(), TransitionError> {
    if !party.may_request(target) {
        return Err(TransitionError::NotPermitted {
            to: target.to_string(),
        });
    }

    if !current.can_transition_to(target) {
        return Err(TransitionError::Invalid {
            from: current.to_string(),
            to: target.to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SELLER: OrderParticipation = OrderParticipation {
        is_buyer: false,
        is_seller: true,
        is_admin: false,
    };
    const BUYER: OrderParticipation = OrderParticipation {
        is_buyer: true,
        is_seller: false,
        is_admin: false,
    };

    #[test]
    fn order_table_matches_lifecycle() {
        use OrderStatus::*;

        let edges: Vec<(OrderStatus, OrderStatus)> = OrderStatus::ALL
            .iter()
            .flat_map(|from| {
                OrderStatus::ALL
                    .iter()
                    .filter(|to| from.can_transition_to(**to))
                    .map(|to| (*from, *to))
            })
            .collect();

        assert_eq!(
            edges,
            vec![
                (Waiting, Processing),
                (Waiting, Canceled),
                (Processing, Shipped),
                (Processing, Canceled),
                (Shipped, Completed),
            ]
        );
        assert!(Completed.is_terminal());
        assert!(Canceled.is_terminal());
    }

    #[test]
    fn seller_cannot_move_shipped_back_to_waiting() {
        let err = check_order_transition(OrderStatus::Shipped, OrderStatus::Waiting, SELLER)
            .unwrap_err();
        assert!(matches!(err, TransitionError::Invalid { .. }));
    }

    #[test]
    fn only_buyer_completes() {
        assert!(check_order_transition(OrderStatus::Shipped, OrderStatus::Completed, BUYER).is_ok());
        assert_eq!(
            check_order_transition(OrderStatus::Shipped, OrderStatus::Completed, SELLER),
            Err(TransitionError::NotPermitted {
                to: "completed".into()
            })
        );
    }

    #[test]
    fn buyer_cannot_ship() {
        let err = check_order_transition(OrderStatus::Processing, OrderStatus::Shipped, BUYER)
            .unwrap_err();
        assert!(matches!(err, TransitionError::NotPermitted { .. }));
    }

    #[test]
    fn completing_twice_is_invalid() {
        let err = check_order_transition(OrderStatus::Completed, OrderStatus::Completed, BUYER)
            .unwrap_err();
        assert!(matches!(err, TransitionError::Invalid { .. }));
    }

    #[test]
    fn buyer_completes_appointment_only_after_confirmation() {
        assert!(
            check_appointment_transition(
                AppointmentStatus::Waiting,
                AppointmentStatus::Completed,
                AppointmentParty::Buyer
            )
            .is_err()
        );
        assert!(
            check_appointment_transition(
                AppointmentStatus::Confirmed,
                AppointmentStatus::Completed,
                AppointmentParty::Buyer
            )
            .is_ok()
        );
    }

    #[test]
    fn buyer_cannot_confirm_appointment() {
        assert!(matches!(
            check_appointment_transition(
                AppointmentStatus::Waiting,
                AppointmentStatus::Confirmed,
                AppointmentParty::Buyer
            ),
            Err(TransitionError::NotPermitted { .. })
        ));
    }

    #[test]
    fn canceled_appointment_is_final() {
        assert!(matches!(
            check_appointment_transition(
                AppointmentStatus::Canceled,
                AppointmentStatus::Confirmed,
                AppointmentParty::Seller
            ),
            Err(TransitionError::Invalid { .. })
        ));
    }
}
