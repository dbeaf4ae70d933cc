//! Update Cart Line Handler

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
    cart::{errors::into_status_error, models::CartLineResponse},
    extensions::*,
    state::State,
};

/// Update Cart Line Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateCartLineRequest {
    /// Zero or less removes the line
    pub quantity: i64,
}

/// Update Cart Line Handler
///
/// Answers 204 when the new quantity removed the line.
#[endpoint(
    tags("cart"),
    summary = "Update Cart Line Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NO_CONTENT, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
    ),
)]
#[tracing::instrument(
    name = "cart.update",
    skip(line, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        cart_line_uuid = tracing::field::Empty,
        quantity = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    json: JsonBody<UpdateCartLineRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let line = line.into_inner();
    let quantity = json.into_inner().quantity;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(caller.user));
    span.record("cart_line_uuid", tracing::field::display(line));
    span.record("quantity", quantity);

    let updated = state
        .app
        .carts
        .update_quantity(caller.user, line.into(), quantity)
        .await
        .map_err(into_status_error)?;

    let Some(updated) = updated else {
        return Ok(StatusCode::NO_CONTENT);
    };

    res.render(Json(CartLineResponse::from(updated)));

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use brewline_app::domain::{
        carts::{CartsServiceError, models::NewCartLine},
        catalog::models::MenuItemUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        cart::models::fixtures::cart_line,
        test_helpers::{Mocks, TEST_USER_UUID, service_as},
    };

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service_as(
            Role::Customer,
            mocks,
            Router::with_path("cart/{line}").put(handler),
        )
    }

    #[tokio::test]
    async fn test_positive_quantity_updates_the_line() -> TestResult {
        let line = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_update_quantity()
            .once()
            .withf(move |user, uuid, quantity| {
                *user == TEST_USER_UUID && uuid.into_uuid() == line && *quantity == 3
            })
            .return_once(|user, _, _| {
                Ok(Some(cart_line(
                    user,
                    NewCartLine {
                        menu_item: MenuItemUuid::new(),
                        size: "small".to_string(),
                        quantity: 3,
                        notes: None,
                    },
                )))
            });

        let mut res = TestClient::put(format!("http://example.com/cart/{line}"))
            .json(&json!({ "quantity": 3 }))
            .send(&make_service(mocks))
            .await;

        let body: CartLineResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.quantity, 3);

        Ok(())
    }

    #[tokio::test]
    async fn test_zero_quantity_removes_the_line() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_update_quantity()
            .once()
            .withf(|_, _, quantity| *quantity == 0)
            .return_once(|_, _, _| Ok(None));

        let res = TestClient::put(format!("http://example.com/cart/{}", Uuid::now_v7()))
            .json(&json!({ "quantity": 0 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_line_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_update_quantity()
            .once()
            .return_once(|_, _, _| Err(CartsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/cart/{}", Uuid::now_v7()))
            .json(&json!({ "quantity": 2 }))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
