//! Create Order Handler

use std::sync::Arc;

use brewline::{orders::OrderType, roles::Permission};
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brewline_app::domain::orders::models::CheckoutRequest;

use crate::{
    extensions::*,
    orders::{
        errors::into_status_error,
        models::{DeliveryAddressBody, OrderResponse},
    },
    state::State,
};

const IDEMPOTENCY_KEY: &str = "idempotency-key";

/// Create Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateOrderRequest {
    /// pickup or delivery
    #[serde(default = "pickup")]
    pub order_type: String,

    pub payment_method: String,

    #[serde(default)]
    pub customer_notes: Option<String>,

    /// Required for delivery orders
    #[serde(default)]
    pub delivery_address: Option<DeliveryAddressBody>,

    #[serde(default)]
    pub promo_code: Option<String>,

    #[serde(default)]
    pub loyalty_points_used: u32,
}

fn pickup() -> String {
    OrderType::Pickup.to_string()
}

impl CreateOrderRequest {
    fn into_checkout(self, idempotency_key: Option<String>) -> Result<CheckoutRequest, StatusError> {
        let order_type = self
            .order_type
            .parse::<OrderType>()
            .or_400("\"order_type\" must be pickup or delivery")?;

        Ok(CheckoutRequest {
            order_type,
            payment_method: self.payment_method,
            customer_notes: self.customer_notes,
            delivery_address: self.delivery_address.map(Into::into),
            promo_code: self.promo_code,
            loyalty_points_used: self.loyalty_points_used,
            idempotency_key,
        })
    }
}

/// Create Order Handler
///
/// Checks out the caller's cart. Retrying with the same `Idempotency-Key`
/// header returns the order created by the first attempt.
#[endpoint(
    tags("orders"),
    summary = "Place Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::CONFLICT, description = "Concurrent change, retry"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart cannot be checked out"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "orders.create",
    skip(req, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    req: &mut Request,
    json: JsonBody<CreateOrderRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let idempotency_key = req
        .headers()
        .get(IDEMPOTENCY_KEY)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string);

    let checkout = json.into_inner().into_checkout(idempotency_key)?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(caller.user));

    let order = state
        .app
        .orders
        .commit_order(caller.user, checkout)
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order));

    let order = state
        .app
        .orders
        .get_order(caller, order)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}
