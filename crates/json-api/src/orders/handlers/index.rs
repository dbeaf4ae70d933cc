//! Own Orders Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// Own Orders Handler
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersViewOwn)?;

    let orders = state
        .app
        .orders
        .list_own_orders(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use brewline_app::domain::orders::models::OrderUuid;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::models::fixtures::latte_order,
        test_helpers::{Mocks, TEST_USER_UUID, service_as},
    };

    use super::*;

    fn make_service(role: Role, mocks: Mocks) -> Service {
        service_as(role, mocks, Router::with_path("orders").get(handler))
    }

    #[tokio::test]
    async fn test_lists_the_callers_orders() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_own_orders()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|user| {
                Ok(vec![
                    latte_order(OrderUuid::new(), user),
                    latte_order(OrderUuid::new(), user),
                ])
            });

        let response: OrdersResponse = TestClient::get("http://example.com/orders")
            .send(&make_service(Role::Customer, mocks))
            .await
            .take_json()
            .await?;

        assert_eq!(response.orders.len(), 2);
        assert!(
            response
                .orders
                .iter()
                .all(|order| order.customer_uuid == TEST_USER_UUID.into_uuid())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_staff_without_own_orders_permission_get_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_list_own_orders().never();

        let res = TestClient::get("http://example.com/orders")
            .send(&make_service(Role::Barista, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
