//! Menu Item Availability Handler

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
    menu::{errors::into_status_error, models::MenuItemResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AvailabilityRequest {
    pub available: bool,
}

/// Menu Item Availability Handler
///
/// Switches an item on or off. Items that are off cannot be added to carts
/// or checked out.
#[endpoint(
    tags("menu"),
    summary = "Set Menu Item Availability",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Availability updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Menu item not found"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing menu:manage"),
    ),
)]
#[tracing::instrument(
    name = "menu.availability",
    skip(item, json, depot),
    fields(menu_item_uuid = tracing::field::Empty, available = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    item: PathParam<Uuid>,
    json: JsonBody<AvailabilityRequest>,
    depot: &mut Depot,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::MenuManage)?;

    let item = item.into_inner();
    let available = json.into_inner().available;

    let span = tracing::Span::current();

    span.record("menu_item_uuid", tracing::field::display(item));
    span.record("available", available);

    let updated = state
        .app
        .catalog
        .set_availability(item.into(), available)
        .await
        .map_err(into_status_error)?;

    Ok(Json(updated.into()))
}
