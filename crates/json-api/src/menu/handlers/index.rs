//! Menu Index Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::{
    oapi::{ToSchema, extract::QueryParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    menu::{errors::into_status_error, models::MenuItemResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuResponse {
    /// Menu items in category and name order
    pub items: Vec<MenuItemResponse>,
}

/// Menu Index Handler
///
/// Lists orderable items. Staff who manage the menu may include items that
/// are switched off.
#[endpoint(
    tags("menu"),
    summary = "List Menu",
    security(("bearer_auth" = []))
)]
pub(crate) async fn handler(
    include_unavailable: QueryParam<bool, false>,
    depot: &mut Depot,
) -> Result<Json<MenuResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;
    let include_unavailable = include_unavailable.into_inner().unwrap_or(false);

    if include_unavailable {
        caller.require(Permission::MenuManage)?;
    }

    let items = state
        .app
        .catalog
        .list_items(include_unavailable)
        .await
        .map_err(into_status_error)?;

    Ok(Json(MenuResponse {
        items: items.into_iter().map(Into::into).collect(),
    }))
}
