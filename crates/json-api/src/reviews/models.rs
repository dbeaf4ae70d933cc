//! Review wire models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::reviews::models::Review;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewResponse {
    pub uuid: Uuid,
    pub order_uuid: Uuid,
    pub customer_uuid: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
    pub response: Option<String>,
    pub responded_by: Option<Uuid>,
    pub responded_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        let (response, responded_by, responded_at) = match review.response {
            Some(answer) => (
                Some(answer.text),
                Some(answer.responded_by.into()),
                Some(answer.responded_at.to_string()),
            ),
            None => (None, None, None),
        };

        ReviewResponse {
            uuid: review.uuid.into(),
            order_uuid: review.order.into(),
            customer_uuid: review.customer.into(),
            rating: review.rating,
            comment: review.comment,
            response,
            responded_by,
            responded_at,
            created_at: review.created_at.to_string(),
            updated_at: review.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ReviewsResponse {
    /// Newest first
    pub reviews: Vec<ReviewResponse>,
}

impl From<Vec<Review>> for ReviewsResponse {
    fn from(reviews: Vec<Review>) -> Self {
        ReviewsResponse {
            reviews: reviews.into_iter().map(Into::into).collect(),
        }
    }
}
