//! Create Review Handler

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

use brewline_app::domain::reviews::models::{NewReview, ReviewUuid};

use crate::{
    extensions::*,
    reviews::{errors::into_status_error, models::ReviewResponse},
    state::State,
};

/// Create Review Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateReviewRequest {
    /// 1 to 5
    pub rating: u8,

    #[serde(default)]
    pub comment: Option<String>,
}

/// Create Review Handler
///
/// One review per completed order, by the customer who placed it.
#[endpoint(
    tags("reviews"),
    summary = "Review Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Review created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Rating out of range"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
        (status_code = StatusCode::CONFLICT, description = "Order already reviewed"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Order is not completed"),
    ),
)]
#[tracing::instrument(
    name = "reviews.create",
    skip(order, json, depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<CreateReviewRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<ReviewResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    caller.require(Permission::OrdersCreate)?;

    let order = order.into_inner();
    let CreateReviewRequest { rating, comment } = json.into_inner();

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(caller.user));
    span.record("order_uuid", tracing::field::display(order));

    let review = state
        .app
        .reviews
        .create_review(
            caller.user,
            NewReview {
                uuid: ReviewUuid::new(),
                order: order.into(),
                rating,
                comment,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(review.into()))
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use brewline_app::domain::{orders::models::OrderUuid, reviews::ReviewsServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        reviews::models::fixtures::review,
        test_helpers::{Mocks, TEST_USER_UUID, service_as},
    };

    use super::*;

    fn make_service(role: Role, mocks: Mocks) -> Service {
        service_as(
            role,
            mocks,
            Router::with_path("orders/{order}/review").post(handler),
        )
    }

    #[tokio::test]
    async fn test_customer_reviews_own_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .reviews
            .expect_create_review()
            .once()
            .withf(move |customer, new| {
                *customer == TEST_USER_UUID
                    && new.order == uuid
                    && new.rating == 5
                    && new.comment.as_deref() == Some("Perfect crema")
            })
            .return_once(|customer, new| {
                let mut created = review(new.order, customer);

                created.rating = new.rating;
                created.comment = new.comment;

                Ok(created)
            });

        let mut res = TestClient::post(format!("http://example.com/orders/{uuid}/review"))
            .json(&json!({ "rating": 5, "comment": "Perfect crema" }))
            .send(&make_service(Role::Customer, mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: ReviewResponse = res.take_json().await?;

        assert_eq!(body.order_uuid, uuid.into_uuid());
        assert_eq!(body.rating, 5);
        assert!(body.response.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_second_review_returns_409() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .reviews
            .expect_create_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::AlreadyReviewed));

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/review",
            OrderUuid::new()
        ))
        .json(&json!({ "rating": 3 }))
        .send(&make_service(Role::Customer, mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }

    #[tokio::test]
    async fn test_pending_order_returns_422() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .reviews
            .expect_create_review()
            .once()
            .return_once(|_, _| Err(ReviewsServiceError::NotReviewable));

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/review",
            OrderUuid::new()
        ))
        .json(&json!({ "rating": 2 }))
        .send(&make_service(Role::Customer, mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_baristas_cannot_review() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.reviews.expect_create_review().never();

        let res = TestClient::post(format!(
            "http://example.com/orders/{}/review",
            OrderUuid::new()
        ))
        .json(&json!({ "rating": 5 }))
        .send(&make_service(Role::Barista, mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
