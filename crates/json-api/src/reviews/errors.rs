//! Review Errors

use salvo::http::StatusError;
use tracing::error;

use brewline_app::domain::reviews::ReviewsServiceError;

pub(crate) fn into_status_error(error: ReviewsServiceError) -> StatusError {
    let detail = error.to_string();

    match error {
        ReviewsServiceError::NotFound => StatusError::not_found().brief("Review not found"),
        ReviewsServiceError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        ReviewsServiceError::NotReviewable => StatusError::unprocessable_entity()
            .brief("Order is not completed")
            .detail(detail),
        ReviewsServiceError::AlreadyReviewed => {
            StatusError::conflict().brief("Order already reviewed")
        }
        ReviewsServiceError::InvalidRating => {
            StatusError::bad_request().brief("Invalid rating").detail(detail)
        }
        ReviewsServiceError::Forbidden => {
            StatusError::forbidden().brief("Order belongs to another customer")
        }
        ReviewsServiceError::InvalidReference => StatusError::not_found().brief("Order not found"),
        ReviewsServiceError::MissingRequiredData | ReviewsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid review payload")
        }
        ReviewsServiceError::Sql(source) => {
            error!("review storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
