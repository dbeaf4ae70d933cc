//! Reviews service.

use async_trait::async_trait;
use brewline::{orders::OrderStatus, roles::Permission};
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::{
        orders::models::OrderUuid,
        reviews::{
            errors::ReviewsServiceError,
            models::{MAX_RATING, MIN_RATING, NewReview, Review, ReviewUuid},
            repository::SqliteReviewsRepository,
        },
        users::models::{Caller, UserUuid},
    },
};

#[derive(Debug, Clone)]
pub struct SqliteReviewsService {
    db: Db,
    repository: SqliteReviewsRepository,
}

impl SqliteReviewsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteReviewsRepository::new(),
        }
    }
}

#[async_trait]
impl ReviewsService for SqliteReviewsService {
    #[tracing::instrument(
        name = "reviews.service.create_review",
        skip(self, review),
        fields(user_uuid = %customer, order_uuid = %review.order, rating = review.rating),
        err
    )]
    async fn create_review(
        &self,
        customer: UserUuid,
        mut review: NewReview,
    ) -> Result<Review, ReviewsServiceError> {
        if !(MIN_RATING..=MAX_RATING).contains(&review.rating) {
            return Err(ReviewsServiceError::InvalidRating);
        }

        review.comment = review.comment.filter(|comment| !comment.trim().is_empty());

        let mut tx = self.db.begin_write().await?;

        let order = self
            .repository
            .find_order(&mut tx, review.order)
            .await?
            .filter(|order| order.customer == customer)
            .ok_or(ReviewsServiceError::OrderNotFound)?;

        if order.status != OrderStatus::Completed {
            return Err(ReviewsServiceError::NotReviewable);
        }

        let created = self
            .repository
            .create_review(&mut tx, customer, review, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!("order reviewed");

        Ok(created)
    }

    async fn get_order_review(
        &self,
        caller: Caller,
        order: OrderUuid,
    ) -> Result<Review, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self
            .repository
            .find_order(&mut tx, order)
            .await?
            .ok_or(ReviewsServiceError::OrderNotFound)?;

        if found.customer != caller.user && !caller.can(Permission::OrdersView) {
            return Err(ReviewsServiceError::Forbidden);
        }

        let review = self.repository.get_order_review(&mut tx, order).await?;

        tx.commit().await?;

        review.ok_or(ReviewsServiceError::NotFound)
    }

    async fn list_own_reviews(&self, customer: UserUuid) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_customer_reviews(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    async fn list_reviews(&self) -> Result<Vec<Review>, ReviewsServiceError> {
        let mut tx = self.db.begin().await?;

        let reviews = self.repository.list_reviews(&mut tx).await?;

        tx.commit().await?;

        Ok(reviews)
    }

    #[tracing::instrument(
        name = "reviews.service.respond",
        skip(self, response),
        fields(review_uuid = %review, user_uuid = %responder),
        err
    )]
    async fn respond(
        &self,
        review: ReviewUuid,
        responder: UserUuid,
        response: String,
    ) -> Result<Review, ReviewsServiceError> {
        let response = response.trim();

        if response.is_empty() {
            return Err(ReviewsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_write().await?;

        let updated = self
            .repository
            .respond(&mut tx, review, responder, response, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!("review answered");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait ReviewsService: Send + Sync {
    /// Rate one of the customer's completed orders. Each order takes one
    /// review.
    async fn create_review(
        &self,
        customer: UserUuid,
        review: NewReview,
    ) -> Result<Review, ReviewsServiceError>;

    /// The review of an order, visible to its customer and to staff who can
    /// see every order.
    async fn get_order_review(
        &self,
        caller: Caller,
        order: OrderUuid,
    ) -> Result<Review, ReviewsServiceError>;

    /// The customer's reviews, newest first.
    async fn list_own_reviews(&self, customer: UserUuid) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Every review, newest first.
    async fn list_reviews(&self) -> Result<Vec<Review>, ReviewsServiceError>;

    /// Record a staff answer to a review.
    async fn respond(
        &self,
        review: ReviewUuid,
        responder: UserUuid,
        response: String,
    ) -> Result<Review, ReviewsServiceError>;
}
