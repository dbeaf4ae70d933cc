//! Order Models

use brewline::{
    orders::{DeliveryAddress, OrderStatus, OrderType},
    pricing::CheckoutTotals,
    promotions::PromoOutcome,
};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::{
    domain::{catalog::models::MenuItemUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Line UUID
pub type OrderLineUuid = TypedUuid<OrderLine>;

/// Payment status recorded on every new order. Payment capture happens
/// elsewhere.
pub const PAYMENT_PENDING: &str = "pending";

/// Placed order with its frozen lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub order_number: String,
    pub customer: UserUuid,
    pub status: OrderStatus,
    pub order_type: OrderType,
    pub payment_method: String,
    pub payment_status: String,
    pub customer_notes: Option<String>,
    pub delivery_address: Option<DeliveryAddress>,
    pub promo_code: Option<String>,
    pub lines: Vec<OrderLine>,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub total_amount: Decimal,
    pub loyalty_points_used: u32,
    pub loyalty_points_earned: u32,
    pub estimated_ready_time: Timestamp,
    pub idempotency_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Line as priced at checkout. Later menu changes do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub uuid: OrderLineUuid,
    pub menu_item: MenuItemUuid,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
    pub notes: Option<String>,
}

/// Checkout Request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutRequest {
    pub order_type: OrderType,
    pub payment_method: String,
    pub customer_notes: Option<String>,
    pub delivery_address: Option<DeliveryAddress>,
    pub promo_code: Option<String>,
    pub loyalty_points_used: u32,
    pub idempotency_key: Option<String>,
}

/// Quote Request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteRequest {
    pub promo_code: Option<String>,
    pub loyalty_points_used: u32,
}

/// Priced cart line in a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedLine {
    pub menu_item: MenuItemUuid,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

/// What checkout would charge right now. Nothing is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub lines: Vec<QuotedLine>,
    pub promo: PromoOutcome,
    pub totals: CheckoutTotals,
}

/// Status Update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub estimated_ready_time: Option<Timestamp>,
}
