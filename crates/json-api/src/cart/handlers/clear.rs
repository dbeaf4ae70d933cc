//! Clear Cart Handler

use std::sync::Arc;

use brewline::roles::Permission;
use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{cart::errors::into_status_error, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ClearCartResponse {
    /// Number of lines removed
    pub removed: u64,
}

/// Clear Cart Handler
#[endpoint(
    tags("cart"),
    summary = "Clear Cart",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<ClearCartResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let removed = state
        .app
        .carts
        .clear(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(ClearCartResponse { removed }))
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, service_as};

    use super::*;

    #[tokio::test]
    async fn test_clear_reports_removed_lines() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .carts
            .expect_clear()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(|_| Ok(4));

        let service = service_as(
            Role::Customer,
            mocks,
            Router::with_path("cart").delete(handler),
        );

        let response: ClearCartResponse = TestClient::delete("http://example.com/cart")
            .send(&service)
            .await
            .take_json()
            .await?;

        assert_eq!(response.removed, 4);

        Ok(())
    }
}
