//! Loyalty Errors

use salvo::http::StatusError;
use tracing::error;

use brewline_app::domain::loyalty::LoyaltyServiceError;

pub(crate) fn into_status_error(error: LoyaltyServiceError) -> StatusError {
    match error {
        LoyaltyServiceError::NotFound => StatusError::not_found().brief("Transaction not found"),
        LoyaltyServiceError::InvalidReference => StatusError::not_found().brief("User not found"),
        LoyaltyServiceError::InvalidPoints => {
            StatusError::bad_request().brief("Points must be positive")
        }
        LoyaltyServiceError::MissingRequiredData | LoyaltyServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid loyalty payload")
        }
        LoyaltyServiceError::Sql(source) => {
            error!("loyalty storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
