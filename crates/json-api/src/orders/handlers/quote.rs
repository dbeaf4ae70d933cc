//! Checkout Quote Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brewline_app::domain::orders::models::QuoteRequest;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::QuoteResponse},
    state::State,
};

/// Checkout Quote Request
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutQuoteRequest {
    #[serde(default)]
    pub promo_code: Option<String>,

    #[serde(default)]
    pub loyalty_points_used: u32,
}

impl From<CheckoutQuoteRequest> for QuoteRequest {
    fn from(request: CheckoutQuoteRequest) -> Self {
        QuoteRequest {
            promo_code: request.promo_code,
            loyalty_points_used: request.loyalty_points_used,
        }
    }
}

/// Checkout Quote Handler
///
/// Prices the caller's cart exactly as checkout would. Nothing is recorded
/// and promo codes that do not apply are reported, not rejected.
#[endpoint(
    tags("checkout"),
    summary = "Quote Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Priced cart"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart cannot be checked out"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CheckoutQuoteRequest>,
    depot: &mut Depot,
) -> Result<Json<QuoteResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let quote = state
        .app
        .orders
        .quote(caller.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(quote.into()))
}
