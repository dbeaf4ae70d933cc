//! Promo Code Errors

use salvo::http::StatusError;
use tracing::error;

use brewline_app::domain::promotions::PromotionsServiceError;

pub(crate) fn into_status_error(error: PromotionsServiceError) -> StatusError {
    match error {
        PromotionsServiceError::AlreadyExists => {
            StatusError::conflict().brief("Promo code already exists")
        }
        PromotionsServiceError::NotFound => StatusError::not_found().brief("Promo code not found"),
        PromotionsServiceError::InvalidReference
        | PromotionsServiceError::MissingRequiredData
        | PromotionsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid promo code payload")
        }
        PromotionsServiceError::Sql(source) => {
            error!("promo code storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
