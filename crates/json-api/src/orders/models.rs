//! Order wire models

use brewline::{orders::DeliveryAddress, pricing::CheckoutTotals};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::orders::models::{Order, OrderLine, Quote, QuotedLine};

use crate::promo_codes::models::PromoOutcomeResponse;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeliveryAddressBody {
    pub street: String,
    pub city: String,
    pub zip_code: String,
    pub phone: String,
}

impl From<DeliveryAddressBody> for DeliveryAddress {
    fn from(body: DeliveryAddressBody) -> Self {
        DeliveryAddress {
            street: body.street,
            city: body.city,
            zip_code: body.zip_code,
            phone: body.phone,
        }
    }
}

impl From<DeliveryAddress> for DeliveryAddressBody {
    fn from(address: DeliveryAddress) -> Self {
        DeliveryAddressBody {
            street: address.street,
            city: address.city,
            zip_code: address.zip_code,
            phone: address.phone,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderLineResponse {
    pub uuid: Uuid,
    pub menu_item_uuid: Uuid,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub notes: Option<String>,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        OrderLineResponse {
            uuid: line.uuid.into(),
            menu_item_uuid: line.menu_item.into(),
            name: line.name,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
            line_total: line.line_total.to_string(),
            notes: line.notes,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub order_number: String,
    pub customer_uuid: Uuid,
    pub status: String,
    pub order_type: String,
    pub payment_method: String,
    pub payment_status: String,
    pub customer_notes: Option<String>,
    pub delivery_address: Option<DeliveryAddressBody>,
    pub promo_code: Option<String>,
    pub lines: Vec<OrderLineResponse>,
    pub subtotal: String,
    pub discount: String,
    pub tax: String,
    pub total_amount: String,
    pub loyalty_points_used: u32,
    pub loyalty_points_earned: u32,
    pub estimated_ready_time: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            uuid: order.uuid.into(),
            order_number: order.order_number,
            customer_uuid: order.customer.into(),
            status: order.status.to_string(),
            order_type: order.order_type.to_string(),
            payment_method: order.payment_method,
            payment_status: order.payment_status,
            customer_notes: order.customer_notes,
            delivery_address: order.delivery_address.map(Into::into),
            promo_code: order.promo_code,
            lines: order.lines.into_iter().map(Into::into).collect(),
            subtotal: order.subtotal.to_string(),
            discount: order.discount.to_string(),
            tax: order.tax.to_string(),
            total_amount: order.total_amount.to_string(),
            loyalty_points_used: order.loyalty_points_used,
            loyalty_points_earned: order.loyalty_points_earned,
            estimated_ready_time: order.estimated_ready_time.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersResponse {
    /// Newest first
    pub orders: Vec<OrderResponse>,
}

impl From<Vec<Order>> for OrdersResponse {
    fn from(orders: Vec<Order>) -> Self {
        OrdersResponse {
            orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuotedLineResponse {
    pub menu_item_uuid: Uuid,
    pub name: String,
    pub size: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<QuotedLine> for QuotedLineResponse {
    fn from(line: QuotedLine) -> Self {
        QuotedLineResponse {
            menu_item_uuid: line.menu_item.into(),
            name: line.name,
            size: line.size,
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
            line_total: line.line_total.to_string(),
        }
    }
}

/// Checkout totals, amounts as decimal strings.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalsResponse {
    pub subtotal: String,
    pub promo_discount: String,
    pub loyalty_discount: String,
    pub discount: String,
    pub tax: String,
    pub total: String,
    pub points_used: u32,
    pub points_earned: u32,
}

impl From<CheckoutTotals> for TotalsResponse {
    fn from(totals: CheckoutTotals) -> Self {
        TotalsResponse {
            subtotal: totals.subtotal.to_string(),
            promo_discount: totals.promo_discount.to_string(),
            loyalty_discount: totals.loyalty_discount.to_string(),
            discount: totals.discount.to_string(),
            tax: totals.tax.to_string(),
            total: totals.total.to_string(),
            points_used: totals.points_used,
            points_earned: totals.points_earned,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct QuoteResponse {
    pub lines: Vec<QuotedLineResponse>,
    pub promo: PromoOutcomeResponse,
    pub totals: TotalsResponse,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        QuoteResponse {
            lines: quote.lines.into_iter().map(Into::into).collect(),
            promo: quote.promo.into(),
            totals: quote.totals.into(),
        }
    }
}
