//! Promo Code Preview Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};

use crate::{
    amounts::parse_amount,
    extensions::*,
    promo_codes::{errors::into_status_error, models::PromoOutcomeResponse},
    state::State,
};

/// Promo Code Preview Handler
///
/// What the code would take off `subtotal` right now. Uses are not counted.
#[endpoint(
    tags("promo-codes"),
    summary = "Preview Promo Code",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Outcome of applying the code"),
        (status_code = StatusCode::BAD_REQUEST, description = "Subtotal is not a decimal amount"),
    ),
)]
pub(crate) async fn handler(
    code: PathParam<String>,
    subtotal: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<PromoOutcomeResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.caller_or_401()?;

    let subtotal = parse_amount(&subtotal.into_inner(), "subtotal")?;

    let outcome = state
        .app
        .promotions
        .preview(&code.into_inner(), subtotal)
        .await
        .map_err(into_status_error)?;

    Ok(Json(outcome.into()))
}
