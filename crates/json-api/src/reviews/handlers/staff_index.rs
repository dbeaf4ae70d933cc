//! Staff Reviews Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::prelude::*;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewsResponse},
    state::State,
};

/// Staff Reviews Handler
///
/// Every review, newest first.
#[endpoint(
    tags("staff"),
    summary = "List All Reviews",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Reviews"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing reviews:respond"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::ReviewsRespond)?;

    let reviews = state
        .app
        .reviews
        .list_reviews()
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into()))
}
