//! Orders service errors.

use brewline::{
    loyalty::InsufficientPoints,
    orders::{IncompleteAddress, InvalidTransition},
    promotions::Ineligibility,
};
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::database::is_contention;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("{item} is not available")]
    ItemUnavailable { item: String },

    #[error("delivery orders need a street, city, zip code and phone")]
    IncompleteAddress,

    #[error("{requested} points requested but only {available} available")]
    InsufficientPoints { requested: u32, available: i64 },

    #[error("promo code \"{code}\" cannot be applied: {reason}")]
    InvalidPromoCode { code: String, reason: Ineligibility },

    #[error("order conflicts with a concurrent change, retry")]
    Conflict,

    #[error("order not found")]
    NotFound,

    #[error("order belongs to another customer")]
    Forbidden,

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("failed to commit order")]
    CommitFailed(#[source] Error),

    #[error("storage error")]
    Sql(#[source] Error),
}

impl OrdersServiceError {
    /// Classify a storage failure inside the checkout unit of work.
    pub(crate) fn commit_failed(error: Error) -> Self {
        match Self::from(error) {
            Self::Sql(error) => Self::CommitFailed(error),
            other => other,
        }
    }
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        if is_contention(&error) {
            return Self::Conflict;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation | ErrorKind::CheckViolation) => Self::Conflict,
            Some(
                ErrorKind::ForeignKeyViolation
                | ErrorKind::NotNullViolation
                | ErrorKind::Other
                | _,
            )
            | None => Self::Sql(error),
        }
    }
}

impl From<IncompleteAddress> for OrdersServiceError {
    fn from(_: IncompleteAddress) -> Self {
        Self::IncompleteAddress
    }
}

impl From<InsufficientPoints> for OrdersServiceError {
    fn from(error: InsufficientPoints) -> Self {
        Self::InsufficientPoints {
            requested: error.requested,
            available: error.available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_not_found() {
        assert!(matches!(
            OrdersServiceError::from(Error::RowNotFound),
            OrdersServiceError::NotFound
        ));
    }

    #[test]
    fn storage_failures_inside_commit_are_commit_failed() {
        assert!(matches!(
            OrdersServiceError::commit_failed(Error::PoolTimedOut),
            OrdersServiceError::CommitFailed(Error::PoolTimedOut)
        ));
    }
}
