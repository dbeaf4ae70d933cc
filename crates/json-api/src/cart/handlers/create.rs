//! Add Cart Line Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::carts::models::NewCartLine;

use crate::{
    cart::{errors::into_status_error, models::CartLineResponse},
    extensions::*,
    state::State,
};

/// Add Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddCartLineRequest {
    pub menu_item_uuid: Uuid,
    pub size: String,
    pub quantity: u32,

    #[serde(default)]
    pub notes: Option<String>,
}

impl From<AddCartLineRequest> for NewCartLine {
    fn from(request: AddCartLineRequest) -> Self {
        NewCartLine {
            menu_item: request.menu_item_uuid.into(),
            size: request.size,
            quantity: request.quantity,
            notes: request.notes.filter(|notes| !notes.trim().is_empty()),
        }
    }
}

/// Add Cart Line Handler
///
/// Adding an item and size already in the cart bumps that line's quantity.
#[endpoint(
    tags("cart"),
    summary = "Add To Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Line added or merged"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Menu item is unavailable"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<AddCartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CartLineResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let line = state
        .app
        .carts
        .add_line(caller.user, json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/cart/{}", line.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(line.into()))
}
