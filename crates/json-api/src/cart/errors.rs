//! Cart Errors

use salvo::http::StatusError;
use tracing::error;

use brewline_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::NotFound => StatusError::not_found().brief("Cart line not found"),
        CartsServiceError::InvalidReference => {
            StatusError::bad_request().brief("Menu item not found")
        }
        CartsServiceError::ItemUnavailable => {
            StatusError::unprocessable_entity().brief("Menu item is unavailable")
        }
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be positive")
        }
        CartsServiceError::MissingRequiredData | CartsServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid cart line payload")
        }
        CartsServiceError::Sql(source) => {
            error!("cart storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
