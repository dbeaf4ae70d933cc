//! Order Errors

use salvo::http::StatusError;
use tracing::error;

use brewline_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    let detail = error.to_string();

    match error {
        OrdersServiceError::EmptyCart => {
            StatusError::unprocessable_entity().brief("Cart is empty").detail(detail)
        }
        OrdersServiceError::ItemUnavailable { .. } => StatusError::unprocessable_entity()
            .brief("Item unavailable")
            .detail(detail),
        OrdersServiceError::IncompleteAddress => StatusError::bad_request()
            .brief("Incomplete delivery address")
            .detail(detail),
        OrdersServiceError::InsufficientPoints { .. } => StatusError::unprocessable_entity()
            .brief("Insufficient loyalty points")
            .detail(detail),
        OrdersServiceError::InvalidPromoCode { .. } => StatusError::unprocessable_entity()
            .brief("Invalid promo code")
            .detail(detail),
        OrdersServiceError::Conflict => StatusError::conflict()
            .brief("Order conflicts with a concurrent change")
            .detail(detail),
        OrdersServiceError::InvalidTransition(_) => StatusError::conflict()
            .brief("Invalid status transition")
            .detail(detail),
        OrdersServiceError::NotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::Forbidden => {
            StatusError::forbidden().brief("Order belongs to another customer")
        }
        OrdersServiceError::CommitFailed(source) => {
            error!("order commit failed: {source}");

            StatusError::internal_server_error()
        }
        OrdersServiceError::Sql(source) => {
            error!("order storage failure: {source}");

            StatusError::internal_server_error()
        }
    }
}
