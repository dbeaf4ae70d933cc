//! Cart Index Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::prelude::*;

use crate::{
    cart::{
        errors::into_status_error,
        models::{CartLineResponse, CartResponse},
    },
    extensions::*,
    state::State,
};

/// Cart Index Handler
#[endpoint(
    tags("cart"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart lines, oldest first"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing orders:create"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let lines = state
        .app
        .carts
        .list_lines(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartResponse {
        lines: lines.into_iter().map(CartLineResponse::from).collect(),
    }))
}
