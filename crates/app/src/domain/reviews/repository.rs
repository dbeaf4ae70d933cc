//! Reviews Repository

use brewline::orders::OrderStatus;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    columns::{timestamp_value, try_get_optional_timestamp, try_get_parsed, try_get_timestamp},
    domain::{
        orders::models::OrderUuid,
        reviews::models::{NewReview, Review, ReviewResponse, ReviewUuid},
        users::models::UserUuid,
    },
};

const CREATE_REVIEW_SQL: &str = include_str!("sql/create_review.sql");
const FIND_ORDER_SQL: &str = include_str!("sql/find_order.sql");
const GET_ORDER_REVIEW_SQL: &str = include_str!("sql/get_order_review.sql");
const LIST_CUSTOMER_REVIEWS_SQL: &str = include_str!("sql/list_customer_reviews.sql");
const LIST_REVIEWS_SQL: &str = include_str!("sql/list_reviews.sql");
const RESPOND_SQL: &str = include_str!("sql/respond.sql");

/// Owner and status of a reviewable order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ReviewedOrder {
    pub(crate) customer: UserUuid,
    pub(crate) status: OrderStatus,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteReviewsRepository;

impl SqliteReviewsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
    ) -> Result<Option<ReviewedOrder>, sqlx::Error> {
        let row = query(FIND_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await?;

        row.map(|row| {
            Ok(ReviewedOrder {
                customer: UserUuid::from_uuid(row.try_get("customer_uuid")?),
                status: try_get_parsed(&row, "status")?,
            })
        })
        .transpose()
    }

    pub(crate) async fn create_review(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: UserUuid,
        review: NewReview,
        now: Timestamp,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Sqlite, Review>(CREATE_REVIEW_SQL)
            .bind(review.uuid.into_uuid())
            .bind(review.order.into_uuid())
            .bind(customer.into_uuid())
            .bind(review.rating)
            .bind(review.comment)
            .bind(timestamp_value(now))
            .bind(timestamp_value(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order_review(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
    ) -> Result<Option<Review>, sqlx::Error> {
        query_as::<Sqlite, Review>(GET_ORDER_REVIEW_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_customer_reviews(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: UserUuid,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Sqlite, Review>(LIST_CUSTOMER_REVIEWS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_reviews(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<Review>, sqlx::Error> {
        query_as::<Sqlite, Review>(LIST_REVIEWS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn respond(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        review: ReviewUuid,
        responder: UserUuid,
        response: &str,
        now: Timestamp,
    ) -> Result<Review, sqlx::Error> {
        query_as::<Sqlite, Review>(RESPOND_SQL)
            .bind(response)
            .bind(responder.into_uuid())
            .bind(timestamp_value(now))
            .bind(timestamp_value(now))
            .bind(review.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, SqliteRow> for Review {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        let text: Option<String> = row.try_get("response")?;
        let responded_by: Option<Uuid> = row.try_get("responded_by")?;
        let responded_at = try_get_optional_timestamp(row, "responded_at")?;

        let response = match (text, responded_by, responded_at) {
            (Some(text), Some(responded_by), Some(responded_at)) => Some(ReviewResponse {
                text,
                responded_by: UserUuid::from_uuid(responded_by),
                responded_at,
            }),
            _ => None,
        };

        Ok(Self {
            uuid: ReviewUuid::from_uuid(row.try_get("uuid")?),
            order: OrderUuid::from_uuid(row.try_get("order_uuid")?),
            customer: UserUuid::from_uuid(row.try_get("customer_uuid")?),
            rating: row.try_get("rating")?,
            comment: row.try_get("comment")?,
            response,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
