//! Orders
//!
//! Order status lifecycle and fulfilment details.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Order status.
///
/// `Pending -> Confirmed -> Preparing -> Ready -> Completed`, with
/// `Cancelled` reachable from every non-terminal status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Placed, not yet accepted by staff.
    #[default]
    Pending,

    /// Accepted by staff.
    Confirmed,

    /// Being made.
    Preparing,

    /// Waiting for pickup or delivery.
    Ready,

    /// Handed over.
    Completed,

    /// Abandoned.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Stable storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// `Completed` and `Cancelled` accept no further transitions.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// The next status on the forward path, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Confirmed),
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Completed),
            Self::Completed | Self::Cancelled => None,
        }
    }

    /// Whether `self -> to` is a legal transition.
    pub fn can_transition_to(self, to: Self) -> bool {
        if self.is_terminal() {
            return false;
        }

        to == Self::Cancelled || self.next() == Some(to)
    }

    /// Move to `to` under the given policy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidTransition`] when the strict policy rejects the move.
    pub fn transition_to(self, to: Self, policy: TransitionPolicy) -> Result<Self, InvalidTransition> {
        match policy {
            TransitionPolicy::Permissive => Ok(to),
            TransitionPolicy::Strict if self.can_transition_to(to) => Ok(to),
            TransitionPolicy::Strict => Err(InvalidTransition { from: self, to }),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown order status label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status \"{0}\"")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownOrderStatus(s.to_string()))
    }
}

/// How status updates are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransitionPolicy {
    /// Only legal lifecycle transitions are accepted.
    #[default]
    Strict,

    /// Any status may overwrite any other.
    Permissive,
}

/// Rejected status change.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("cannot move an order from {from} to {to}")]
pub struct InvalidTransition {
    /// Current status.
    pub from: OrderStatus,

    /// Requested status.
    pub to: OrderStatus,
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum OrderType {
    /// Collected at the counter.
    #[default]
    Pickup,

    /// Delivered to an address.
    Delivery,
}

impl OrderType {
    /// Stable storage label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pickup => "pickup",
            Self::Delivery => "delivery",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown order type label.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order type \"{0}\"")]
pub struct UnknownOrderType(pub String);

impl FromStr for OrderType {
    type Err = UnknownOrderType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickup" => Ok(Self::Pickup),
            "delivery" => Ok(Self::Delivery),
            other => Err(UnknownOrderType(other.to_string())),
        }
    }
}

/// Delivery destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryAddress {
    /// Street and number.
    pub street: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub zip_code: String,

    /// Contact phone number.
    pub phone: String,
}

impl DeliveryAddress {
    /// Every field holds something other than whitespace.
    pub fn is_complete(&self) -> bool {
        [&self.street, &self.city, &self.zip_code, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// Delivery order without a usable address.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("delivery orders need a street, city, zip code and phone number")]
pub struct IncompleteAddress;

/// Check the address requirements of an order type.
///
/// # Errors
///
/// Returns [`IncompleteAddress`] for a delivery without a complete address.
pub fn ensure_deliverable(
    order_type: OrderType,
    address: Option<&DeliveryAddress>,
) -> Result<(), IncompleteAddress> {
    match (order_type, address) {
        (OrderType::Pickup, _) => Ok(()),
        (OrderType::Delivery, Some(address)) if address.is_complete() => Ok(()),
        (OrderType::Delivery, _) => Err(IncompleteAddress),
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn forward_path_is_legal() {
        let path = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ];

        for pair in path.windows(2) {
            if let [from, to] = pair {
                assert!(from.can_transition_to(*to), "{from} -> {to} should be legal");
            }
        }
    }

    #[test]
    fn cancel_is_legal_from_non_terminal_statuses() {
        for status in OrderStatus::ALL {
            assert_eq!(
                status.can_transition_to(OrderStatus::Cancelled),
                !status.is_terminal(),
                "cancel from {status}"
            );
        }
    }

    #[test]
    fn skipping_ahead_is_rejected() {
        assert_eq!(
            OrderStatus::Pending.transition_to(OrderStatus::Ready, TransitionPolicy::Strict),
            Err(InvalidTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Ready,
            })
        );
    }

    #[test]
    fn going_backwards_is_rejected() {
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Preparing));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn terminal_statuses_are_final() {
        assert!(!OrderStatus::Completed.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn permissive_policy_allows_any_overwrite() -> TestResult {
        let status =
            OrderStatus::Completed.transition_to(OrderStatus::Pending, TransitionPolicy::Permissive)?;

        assert_eq!(status, OrderStatus::Pending);

        Ok(())
    }

    #[test]
    fn status_labels_parse() -> TestResult {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>()?, status);
        }

        assert!("done".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn pickup_needs_no_address() {
        assert_eq!(ensure_deliverable(OrderType::Pickup, None), Ok(()));
    }

    #[test]
    fn delivery_needs_complete_address() {
        let address = DeliveryAddress {
            street: "1 Bean St".to_string(),
            city: "Portland".to_string(),
            zip_code: "97201".to_string(),
            phone: "  ".to_string(),
        };

        assert_eq!(
            ensure_deliverable(OrderType::Delivery, None),
            Err(IncompleteAddress)
        );
        assert_eq!(
            ensure_deliverable(OrderType::Delivery, Some(&address)),
            Err(IncompleteAddress)
        );

        let address = DeliveryAddress {
            phone: "555-0100".to_string(),
            ..address
        };

        assert_eq!(ensure_deliverable(OrderType::Delivery, Some(&address)), Ok(()));
    }
}
