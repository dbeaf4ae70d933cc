//! Change Role Handler

use std::sync::Arc;

use brewline::roles::{Permission, Role};
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
    staff::{errors::into_status_error, models::StaffMemberResponse},
    state::State,
};

/// Change Role Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ChangeRoleRequest {
    pub role: String,
}

/// Change Role Handler
///
/// Existing tokens pick up the new role on their next request.
#[endpoint(
    tags("staff"),
    summary = "Change User Role",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Role changed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown role"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing staff:manage"),
        (status_code = StatusCode::NOT_FOUND, description = "User not found"),
    ),
)]
#[tracing::instrument(
    name = "staff.set_role",
    skip(user, json, depot),
    fields(
        staff_uuid = tracing::field::Empty,
        user_uuid = tracing::field::Empty,
        role = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    user: PathParam<Uuid>,
    json: JsonBody<ChangeRoleRequest>,
    depot: &mut Depot,
) -> Result<Json<StaffMemberResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::StaffManage)?;

    let user = user.into_inner();
    let role = json
        .into_inner()
        .role
        .parse::<Role>()
        .or_400("\"role\" is not a role")?;

    let span = tracing::Span::current();

    span.record("staff_uuid", tracing::field::display(caller.user));
    span.record("user_uuid", tracing::field::display(user));
    span.record("role", role.as_str());

    let updated = state
        .app
        .users
        .set_role(user.into(), role)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
