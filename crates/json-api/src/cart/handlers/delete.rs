//! Remove Cart Line Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{cart::errors::into_status_error, extensions::*, state::State};

/// Remove Cart Line Handler
#[endpoint(
    tags("cart"),
    summary = "Remove Cart Line",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::NO_CONTENT, description = "Line removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart line not found"),
    ),
)]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let line = line.into_inner();

    state
        .app
        .carts
        .remove_line(caller.user, line.into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(cart_line_uuid = %line, "removed cart line");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use brewline_app::domain::carts::CartsServiceError;
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service_as};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        service_as(
            Role::Customer,
            mocks,
            Router::with_path("cart/{line}").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_line_returns_204() -> TestResult {
        let line = Uuid::now_v7();
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_line()
            .once()
            .withf(move |user, uuid| *user == TEST_USER_UUID && uuid.into_uuid() == line)
            .return_once(|_, _| Ok(()));

        let res = TestClient::delete(format!("http://example.com/cart/{line}"))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NO_CONTENT));

        Ok(())
    }

    #[tokio::test]
    async fn test_someone_elses_line_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_remove_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::NotFound));

        let res = TestClient::delete(format!("http://example.com/cart/{}", Uuid::now_v7()))
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
