//! Get Order Review Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewResponse},
    state::State,
};

/// Get Order Review Handler
///
/// Customers see reviews of their own orders. Staff with `orders:view` see
/// any.
#[endpoint(
    tags("reviews"),
    summary = "Get Order Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Review found"),
        (status_code = StatusCode::FORBIDDEN, description = "Order belongs to another customer"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or review not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let review = state
        .app
        .reviews
        .get_order_review(caller, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(review.into()))
}
