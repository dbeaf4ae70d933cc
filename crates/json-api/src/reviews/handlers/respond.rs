//! Respond To Review Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewResponse},
    state::State,
};

/// Respond To Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RespondToReviewRequest {
    pub response: String,
}

/// Respond To Review Handler
///
/// A later answer replaces an earlier one.
#[endpoint(
    tags("staff"),
    summary = "Respond To Review",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Response saved"),
        (status_code = StatusCode::BAD_REQUEST, description = "Blank response"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing reviews:respond"),
        (status_code = StatusCode::NOT_FOUND, description = "Review not found"),
    ),
)]
#[tracing::instrument(
    name = "reviews.respond",
    skip(review, json, depot),
    fields(
        staff_uuid = tracing::field::Empty,
        review_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    review: PathParam<Uuid>,
    json: JsonBody<RespondToReviewRequest>,
    depot: &mut Depot,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::ReviewsRespond)?;

    let review = review.into_inner();

    let span = tracing::Span::current();

    span.record("staff_uuid", tracing::field::display(caller.user));
    span.record("review_uuid", tracing::field::display(review));

    let answered = state
        .app
        .reviews
        .respond(review.into(), caller.user, json.into_inner().response)
        .await
        .map_err(into_status_error)?;

    Ok(Json(answered.into()))
}
