//! Staff List Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::prelude::*;

use crate::{
    extensions::*,
    staff::{errors::into_status_error, models::StaffResponse},
    state::State,
};

/// Staff List Handler
#[endpoint(
    tags("staff"),
    summary = "List Staff",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Staff accounts"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing staff:view"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<StaffResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::StaffView)?;

    let staff = state
        .app
        .users
        .list_staff()
        .await
        .map_err(into_status_error)?;

    Ok(Json(staff.into()))
}
