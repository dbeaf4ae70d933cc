//! Create Menu Item Handler

use std::sync::Arc;

use brewline::{catalog::Variant, roles::Permission};
use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use brewline_app::domain::catalog::models::{MenuItemUuid, NewCatalogItem};

use crate::{
    amounts::parse_amount,
    extensions::*,
    menu::{errors::into_status_error, models::MenuItemResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantRequest {
    pub size: String,

    /// Decimal string, may be negative
    pub price_modifier: String,
}

/// Create Menu Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateMenuItemRequest {
    pub name: String,

    #[serde(default)]
    pub description: String,

    pub category: String,

    /// Decimal string
    pub base_price: String,

    #[serde(default)]
    pub variants: Vec<VariantRequest>,

    #[serde(default = "available_by_default")]
    pub available: bool,
}

fn available_by_default() -> bool {
    true
}

impl CreateMenuItemRequest {
    fn into_new_item(self) -> Result<NewCatalogItem, StatusError> {
        let variants = self
            .variants
            .into_iter()
            .map(|variant| {
                parse_amount(&variant.price_modifier, "price_modifier")
                    .map(|modifier| Variant::new(variant.size, modifier))
            })
            .collect::<Result<_, _>>()?;

        Ok(NewCatalogItem {
            uuid: MenuItemUuid::new(),
            name: self.name,
            description: self.description,
            category: self.category,
            base_price: parse_amount(&self.base_price, "base_price")?,
            variants,
            available: self.available,
        })
    }
}

/// Create Menu Item Handler
#[endpoint(
    tags("menu"),
    summary = "Create Menu Item",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Menu item created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing menu:manage"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreateMenuItemRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<MenuItemResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::MenuManage)?;

    let item = state
        .app
        .catalog
        .create_item(json.into_inner().into_new_item()?)
        .await
        .map_err(into_status_error)?;

    res.add_header(LOCATION, format!("/menu/{}", item.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    tracing::info!(menu_item_uuid = %item.uuid, name = %item.item.name, "created menu item");

    Ok(Json(item.into()))
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use brewline_app::domain::catalog::CatalogServiceError;
    use rust_decimal_macros::dec;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        menu::models::fixtures::latte,
        test_helpers::{Mocks, service_as},
    };

    use super::*;

    fn make_service(role: Role, mocks: Mocks) -> Service {
        service_as(role, mocks, Router::with_path("menu").post(handler))
    }

    fn body() -> serde_json::Value {
        json!({
            "name": "Latte",
            "category": "coffee",
            "base_price": "4.75",
            "variants": [
                { "size": "small", "price_modifier": "0" },
                { "size": "medium", "price_modifier": "0.75" }
            ]
        })
    }

    #[tokio::test]
    async fn test_create_menu_item_success() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_create_item()
            .once()
            .withf(|new| {
                new.name == "Latte"
                    && new.base_price == dec!(4.75)
                    && new.available
                    && new.variants.len() == 2
                    && new.variants[1] == Variant::new("medium", dec!(0.75))
            })
            .return_once(|new| Ok(latte(new.uuid)));

        let mut res = TestClient::post("http://example.com/menu")
            .json(&body())
            .send(&make_service(Role::Manager, mocks))
            .await;

        let body: MenuItemResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/menu/{}", body.uuid).as_str()));
        assert_eq!(body.name, "Latte");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_item_requires_menu_manage() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.catalog.expect_create_item().never();

        let res = TestClient::post("http://example.com/menu")
            .json(&body())
            .send(&make_service(Role::Barista, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_item_bad_price_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.catalog.expect_create_item().never();

        let res = TestClient::post("http://example.com/menu")
            .json(&json!({ "name": "Latte", "category": "coffee", "base_price": "cheap" }))
            .send(&make_service(Role::Manager, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_menu_item_invalid_data_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .catalog
            .expect_create_item()
            .once()
            .return_once(|_| Err(CatalogServiceError::InvalidData));

        let res = TestClient::post("http://example.com/menu")
            .json(&body())
            .send(&make_service(Role::Manager, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
