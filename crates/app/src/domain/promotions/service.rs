//! Promotions service.

use async_trait::async_trait;
use brewline::promotions::{DiscountKind, PromoOutcome};
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;

use crate::{
    database::Db,
    domain::promotions::{
        errors::PromotionsServiceError,
        models::{NewPromoCode, PromoCodeRecord},
        repository::SqlitePromotionsRepository,
    },
};

const MAX_PERCENTAGE: Decimal = Decimal::ONE_HUNDRED;

#[derive(Debug, Clone)]
pub struct SqlitePromotionsService {
    db: Db,
    repository: SqlitePromotionsRepository,
}

impl SqlitePromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqlitePromotionsRepository::new(),
        }
    }
}

fn validate(promo: &NewPromoCode) -> Result<(), PromotionsServiceError> {
    if promo.code.trim().is_empty() {
        return Err(PromotionsServiceError::MissingRequiredData);
    }

    let amounts_valid = promo.value >= Decimal::ZERO
        && promo.min_order_amount.is_none_or(|min| min >= Decimal::ZERO)
        && promo.max_discount.is_none_or(|max| max >= Decimal::ZERO);

    let percentage_valid = promo.kind != DiscountKind::Percentage || promo.value <= MAX_PERCENTAGE;

    let window_valid = match (promo.valid_from, promo.valid_until) {
        (Some(from), Some(until)) => from < until,
        _ => true,
    };

    if amounts_valid && percentage_valid && window_valid {
        Ok(())
    } else {
        Err(PromotionsServiceError::InvalidData)
    }
}

#[async_trait]
impl PromotionsService for SqlitePromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promo_code",
        skip(self, promo),
        fields(promo_code_uuid = %promo.uuid, code = %promo.code),
        err
    )]
    async fn create_promo_code(
        &self,
        promo: NewPromoCode,
    ) -> Result<PromoCodeRecord, PromotionsServiceError> {
        validate(&promo)?;

        let mut tx = self.db.begin_write().await?;

        let created = self
            .repository
            .create_promo_code(&mut tx, promo, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn list_promo_codes(&self) -> Result<Vec<PromoCodeRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let codes = self.repository.list_promo_codes(&mut tx).await?;

        tx.commit().await?;

        Ok(codes)
    }

    async fn get_promo_code(&self, code: &str) -> Result<PromoCodeRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let promo = self
            .repository
            .find_by_code(&mut tx, code)
            .await?
            .ok_or(PromotionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(promo)
    }

    #[tracing::instrument(
        name = "promotions.service.set_active",
        skip(self),
        fields(code = %code, active),
        err
    )]
    async fn set_active(
        &self,
        code: &str,
        active: bool,
    ) -> Result<PromoCodeRecord, PromotionsServiceError> {
        let mut tx = self.db.begin_write().await?;

        let updated = self
            .repository
            .set_active(&mut tx, code, active, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn preview(
        &self,
        code: &str,
        subtotal: Decimal,
    ) -> Result<PromoOutcome, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.repository.find_by_code(&mut tx, code).await?;

        tx.commit().await?;

        Ok(PromoOutcome::evaluate(
            Some(code),
            found.as_ref().map(|promo| &promo.rules),
            subtotal,
            Timestamp::now(),
        ))
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Create a promo code with no recorded uses.
    async fn create_promo_code(
        &self,
        promo: NewPromoCode,
    ) -> Result<PromoCodeRecord, PromotionsServiceError>;

    /// List every promo code.
    async fn list_promo_codes(&self) -> Result<Vec<PromoCodeRecord>, PromotionsServiceError>;

    /// Retrieve a promo code by exact value.
    async fn get_promo_code(&self, code: &str) -> Result<PromoCodeRecord, PromotionsServiceError>;

    /// Switch a promo code on or off.
    async fn set_active(
        &self,
        code: &str,
        active: bool,
    ) -> Result<PromoCodeRecord, PromotionsServiceError>;

    /// What `code` would be worth against `subtotal` right now. Nothing is
    /// recorded.
    async fn preview(
        &self,
        code: &str,
        subtotal: Decimal,
    ) -> Result<PromoOutcome, PromotionsServiceError>;
}
