//! Reorder Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    cart::models::{CartLineResponse, CartResponse},
    extensions::*,
    orders::errors::into_status_error,
    state::State,
};

/// Reorder Handler
///
/// Replaces the caller's cart with the lines of a past order whose items are
/// still available. Returns the new cart.
#[endpoint(
    tags("orders"),
    summary = "Reorder",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart refilled"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let lines = state
        .app
        .orders
        .reorder(caller.user, order.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse {
        lines: lines.into_iter().map(CartLineResponse::from).collect(),
    }))
}
