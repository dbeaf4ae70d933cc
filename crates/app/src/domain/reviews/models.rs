//! Review Models

use jiff::Timestamp;

use crate::{
    domain::{orders::models::OrderUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Review UUID
pub type ReviewUuid = TypedUuid<Review>;

/// Lowest accepted rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

/// A customer's rating of one of their completed orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub uuid: ReviewUuid,
    pub order: OrderUuid,
    pub customer: UserUuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub response: Option<ReviewResponse>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Staff answer to a review. A later answer replaces an earlier one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewResponse {
    pub text: String,
    pub responded_by: UserUuid,
    pub responded_at: Timestamp,
}

/// New Review Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub uuid: ReviewUuid,
    pub order: OrderUuid,
    pub rating: u8,
    pub comment: Option<String>,
}
