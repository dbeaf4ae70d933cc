//! Update Order Status Handler

use std::sync::Arc;

use brewline::{orders::OrderStatus, roles::Permission};
use jiff::Timestamp;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::orders::models::StatusUpdate;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderStatusRequest {
    pub status: String,

    /// RFC 3339 timestamp
    #[serde(default)]
    pub estimated_ready_time: Option<String>,
}

impl TryFrom<UpdateOrderStatusRequest> for StatusUpdate {
    type Error = StatusError;

    fn try_from(request: UpdateOrderStatusRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .parse::<OrderStatus>()
            .or_400("\"status\" is not an order status")?;

        let estimated_ready_time = request
            .estimated_ready_time
            .map(|time| time.parse::<Timestamp>())
            .transpose()
            .or_400("\"estimated_ready_time\" must be an RFC 3339 timestamp")?;

        Ok(StatusUpdate {
            status,
            estimated_ready_time,
        })
    }
}

/// Update Order Status Handler
#[endpoint(
    tags("staff"),
    summary = "Update Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing orders:update_status"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Transition not allowed"),
    ),
)]
#[tracing::instrument(
    name = "orders.update_status",
    skip(order, json, depot),
    fields(
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersUpdateStatus)?;

    let order = order.into_inner();
    let update = StatusUpdate::try_from(json.into_inner())?;

    let span = tracing::Span::current();

    span.record("order_uuid", tracing::field::display(order));
    span.record("status", update.status.as_str());

    let updated = state
        .app
        .orders
        .update_order_status(order.into(), update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
