//! Staff Orders Handler

use std::sync::Arc;

use brewline::{orders::OrderStatus, roles::Permission};
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersResponse},
    state::State,
};

/// Staff Orders Handler
///
/// Every order, newest first, optionally only those with `status`.
#[endpoint(
    tags("staff"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Orders"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status"),
        (status_code = StatusCode::FORBIDDEN, description = "Missing orders:view"),
    ),
)]
pub(crate) async fn handler(
    status: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<OrdersResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersView)?;

    let status = status
        .into_inner()
        .map(|status| status.parse::<OrderStatus>())
        .transpose()
        .or_400("\"status\" is not an order status")?;

    let orders = state
        .app
        .orders
        .list_orders(status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into()))
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use brewline_app::domain::{orders::models::OrderUuid, users::models::UserUuid};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::models::fixtures::latte_order,
        test_helpers::{Mocks, service_as},
    };

    use super::*;

    fn make_service(role: Role, mocks: Mocks) -> Service {
        service_as(role, mocks, Router::with_path("staff/orders").get(handler))
    }

    #[tokio::test]
    async fn test_filters_by_status() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|status| *status == Some(OrderStatus::Preparing))
            .return_once(|_| {
                let mut order = latte_order(OrderUuid::new(), UserUuid::new());

                order.status = OrderStatus::Preparing;

                Ok(vec![order])
            });

        let response: OrdersResponse =
            TestClient::get("http://example.com/staff/orders?status=preparing")
                .send(&make_service(Role::Barista, mocks))
                .await
                .take_json()
                .await?;

        assert_eq!(response.orders.len(), 1);
        assert_eq!(response.orders[0].status, "preparing");

        Ok(())
    }

    #[tokio::test]
    async fn test_without_status_lists_everything() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(Option::is_none)
            .return_once(|_| Ok(Vec::new()));

        let res = TestClient::get("http://example.com/staff/orders")
            .send(&make_service(Role::Manager, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_status_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/staff/orders?status=lost")
            .send(&make_service(Role::Barista, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_customers_get_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/staff/orders")
            .send(&make_service(Role::Customer, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
