//! Promo Code Models

use brewline::promotions::{DiscountKind, PromoCode};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Promo Code UUID
pub type PromoCodeUuid = TypedUuid<PromoCodeRecord>;

/// Stored promo code and its current usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromoCodeRecord {
    pub uuid: PromoCodeUuid,
    pub description: String,
    pub rules: PromoCode,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Promo Code Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPromoCode {
    pub uuid: PromoCodeUuid,
    pub code: String,
    pub description: String,
    pub kind: DiscountKind,
    pub value: Decimal,
    pub min_order_amount: Option<Decimal>,
    pub max_discount: Option<Decimal>,
    pub valid_from: Option<Timestamp>,
    pub valid_until: Option<Timestamp>,
    pub usage_limit: Option<u32>,
    pub active: bool,
}
