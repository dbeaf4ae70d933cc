//! Own Reviews Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::prelude::*;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewsResponse},
    state::State,
};

/// Own Reviews Handler
#[endpoint(
    tags("reviews"),
    summary = "List My Reviews",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ReviewsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersViewOwn)?;

    let reviews = state
        .app
        .reviews
        .list_own_reviews(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(reviews.into()))
}
