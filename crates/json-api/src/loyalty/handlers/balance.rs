//! Loyalty Balance Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    loyalty::{errors::into_status_error, models::LoyaltyBalanceResponse},
    state::State,
};

/// Loyalty Balance Handler
///
/// The caller's own balance with lifetime totals.
#[endpoint(
    tags("loyalty"),
    summary = "Get Loyalty Balance",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<LoyaltyBalanceResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let summary = state
        .app
        .loyalty
        .get_balance(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(summary.into()))
}
