//! Loyalty Bonus Handler

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
    loyalty::{errors::into_status_error, models::LoyaltyTransactionResponse},
    state::State,
};

/// Loyalty Bonus Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoyaltyBonusRequest {
    pub points: u32,
    pub description: String,
}

/// Loyalty Bonus Handler
///
/// Grants points to a customer outside of any order.
#[endpoint(
    tags("loyalty"),
    summary = "Post Bonus Points",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Bonus posted"),
        (status_code = StatusCode::BAD_REQUEST, description = "Points must be positive"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing loyalty:manage"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "loyalty.bonus",
    skip(user, json, depot, res),
    fields(
        staff_uuid = tracing::field::Empty,
        user_uuid = tracing::field::Empty,
        points = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<LoyaltyBonusRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<LoyaltyTransactionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::LoyaltyManage)?;

    let user = user.into_inner();
    let LoyaltyBonusRequest {
        points,
        description,
    } = json.into_inner();

    let span = tracing::Span::current();

    span.record("staff_uuid", tracing::field::display(caller.user));
    span.record("user_uuid", tracing::field::display(user));
    span.record("points", points);

    let posted = state
        .app
        .loyalty
        .post_bonus(user.into(), points, description)
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    tracing::info!(loyalty_transaction_uuid = %posted.uuid, "posted bonus points");

    Ok(Json(posted.into()))
}
