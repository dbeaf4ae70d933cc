//! Checkout snapshot pricing

use brewline::{pricing::PricedLine, promotions::PromoOutcome};
use jiff::Timestamp;
use rand::Rng;
use rust_decimal::Decimal;
use sqlx::{Sqlite, Transaction};
use tracing::warn;

use crate::domain::{
    carts::{models::CartLine, repository::SqliteCartsRepository},
    catalog::repository::SqliteCatalogRepository,
    orders::{
        errors::OrdersServiceError,
        models::{OrderLine, OrderLineUuid, QuotedLine},
        repository::SqliteOrdersRepository,
    },
    promotions::{models::PromoCodeUuid, repository::SqlitePromotionsRepository},
    users::models::UserUuid,
};

/// Cart line with the menu data it was priced from.
#[derive(Debug, Clone)]
pub(crate) struct PricedEntry {
    pub(crate) line: CartLine,
    pub(crate) name: String,
    pub(crate) priced: PricedLine,
}

/// Snapshot of a user's cart, priced against the current menu.
#[derive(Debug, Clone)]
pub(crate) struct PricedCart {
    pub(crate) entries: Vec<PricedEntry>,
}

impl PricedCart {
    pub(crate) fn priced_lines(&self) -> Vec<PricedLine> {
        self.entries.iter().map(|entry| entry.priced).collect()
    }

    pub(crate) fn subtotal(&self) -> Decimal {
        brewline::pricing::subtotal(&self.priced_lines())
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn quoted_lines(&self) -> Vec<QuotedLine> {
        self.entries
            .iter()
            .map(|entry| QuotedLine {
                menu_item: entry.line.menu_item,
                name: entry.name.clone(),
                size: entry.line.size.clone(),
                quantity: entry.priced.quantity,
                unit_price: entry.priced.unit_price,
                line_total: entry.priced.line_total(),
            })
            .collect()
    }

    pub(crate) fn order_lines(&self) -> Vec<OrderLine> {
        self.entries
            .iter()
            .map(|entry| OrderLine {
                uuid: OrderLineUuid::new(),
                menu_item: entry.line.menu_item,
                name: entry.name.clone(),
                size: entry.line.size.clone(),
                quantity: entry.priced.quantity,
                unit_price: entry.priced.unit_price,
                line_total: entry.priced.line_total(),
                notes: entry.line.notes.clone(),
            })
            .collect()
    }
}

/// Read and price the user's cart inside `tx`.
///
/// Fails with `EmptyCart` when there is nothing to price and with
/// `ItemUnavailable` when any line's item is missing or switched off.
pub(crate) async fn price_cart(
    tx: &mut Transaction<'_, Sqlite>,
    carts: &SqliteCartsRepository,
    catalog: &SqliteCatalogRepository,
    user: UserUuid,
) -> Result<PricedCart, OrdersServiceError> {
    let lines = carts.list_lines(tx, user).await?;

    if lines.is_empty() {
        return Err(OrdersServiceError::EmptyCart);
    }

    let mut entries = Vec::with_capacity(lines.len());

    for line in lines {
        let Some(found) = catalog.find_item(tx, line.menu_item).await? else {
            return Err(OrdersServiceError::ItemUnavailable {
                item: line.menu_item.to_string(),
            });
        };

        if !found.item.available {
            return Err(OrdersServiceError::ItemUnavailable {
                item: found.item.name,
            });
        }

        if !found.item.variants.is_empty() && found.item.variant(&line.size).is_none() {
            warn!(
                menu_item_uuid = %line.menu_item,
                size = %line.size,
                "unknown size, charging base price"
            );
        }

        let priced = PricedLine::for_item(&found.item, &line.size, line.quantity);

        entries.push(PricedEntry {
            name: found.item.name,
            line,
            priced,
        });
    }

    Ok(PricedCart { entries })
}

/// Promo code evaluated against a cart.
#[derive(Debug, Clone)]
pub(crate) struct EvaluatedPromo {
    pub(crate) outcome: PromoOutcome,

    /// Set when the code applies and its usage must be counted.
    pub(crate) applied: Option<PromoCodeUuid>,
}

/// Look up and evaluate the requested promo code. A blank code counts as
/// none.
pub(crate) async fn evaluate_promo(
    tx: &mut Transaction<'_, Sqlite>,
    promotions: &SqlitePromotionsRepository,
    requested: Option<&str>,
    subtotal: Decimal,
    now: Timestamp,
) -> Result<EvaluatedPromo, OrdersServiceError> {
    let requested = requested.filter(|code| !code.is_empty());

    let found = match requested {
        Some(code) => promotions.find_by_code(tx, code).await?,
        None => None,
    };

    let outcome = PromoOutcome::evaluate(
        requested,
        found.as_ref().map(|promo| &promo.rules),
        subtotal,
        now,
    );

    let applied = found
        .filter(|_| outcome.is_applied())
        .map(|promo| promo.uuid);

    Ok(EvaluatedPromo { outcome, applied })
}

/// Fresh order numbers tried before checkout gives up with a conflict.
const ORDER_NUMBER_ATTEMPTS: usize = 5;

/// Human-readable order number: `CF`, the last six digits of the
/// millisecond timestamp and a three-digit suffix.
pub(crate) fn order_number(now: Timestamp, suffix: u16) -> String {
    let stamp = now.as_millisecond().rem_euclid(1_000_000);

    format!("CF{stamp:06}{:03}", suffix % 1000)
}

pub(crate) fn random_suffix() -> u16 {
    rand::thread_rng().gen_range(0..1000)
}

/// Pick an order number no stored order uses yet.
///
/// Must run inside the checkout's write transaction so the number stays free
/// until the order is inserted.
pub(crate) async fn unique_order_number(
    tx: &mut Transaction<'_, Sqlite>,
    orders: &SqliteOrdersRepository,
    now: Timestamp,
    mut suffixes: impl FnMut() -> u16,
) -> Result<String, OrdersServiceError> {
    for _ in 0..ORDER_NUMBER_ATTEMPTS {
        let candidate = order_number(now, suffixes());

        if !orders
            .order_number_taken(tx, &candidate)
            .await
            .map_err(OrdersServiceError::commit_failed)?
        {
            return Ok(candidate);
        }

        warn!(order_number = %candidate, "order number already taken");
    }

    Err(OrdersServiceError::Conflict)
}
