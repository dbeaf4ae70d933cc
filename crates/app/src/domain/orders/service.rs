//! Orders service.

use async_trait::async_trait;
use brewline::{
    loyalty::{TransactionKind, ensure_redeemable},
    orders::{OrderStatus, ensure_deliverable},
    pricing::compute_totals,
    promotions::{PromoOutcome, PromoPolicy},
    roles::Permission,
};
use jiff::Timestamp;
use mockall::automock;
use tracing::{Span, field, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::{
            models::{CartLine, NewCartLine},
            repository::SqliteCartsRepository,
        },
        catalog::repository::SqliteCatalogRepository,
        loyalty::{models::NewLoyaltyTransaction, repository::SqliteLoyaltyRepository},
        orders::{
            checkout::{evaluate_promo, price_cart, random_suffix, unique_order_number},
            errors::OrdersServiceError,
            models::{
                CheckoutRequest, Order, OrderUuid, PAYMENT_PENDING, Quote, QuoteRequest,
                StatusUpdate,
            },
            repository::SqliteOrdersRepository,
        },
        promotions::repository::SqlitePromotionsRepository,
        users::models::{Caller, UserUuid},
    },
    settings::CheckoutSettings,
};

#[derive(Debug, Clone)]
pub struct SqliteOrdersService {
    db: Db,
    settings: CheckoutSettings,
    orders: SqliteOrdersRepository,
    carts: SqliteCartsRepository,
    catalog: SqliteCatalogRepository,
    promotions: SqlitePromotionsRepository,
    loyalty: SqliteLoyaltyRepository,
}

impl SqliteOrdersService {
    #[must_use]
    pub fn new(db: Db, settings: CheckoutSettings) -> Self {
        Self {
            db,
            settings,
            orders: SqliteOrdersRepository::new(),
            carts: SqliteCartsRepository::new(),
            catalog: SqliteCatalogRepository::new(),
            promotions: SqlitePromotionsRepository::new(),
            loyalty: SqliteLoyaltyRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for SqliteOrdersService {
    #[tracing::instrument(
        name = "orders.service.quote",
        skip(self, request),
        fields(user_uuid = %user, points_used = request.loyalty_points_used),
        err
    )]
    async fn quote(&self, user: UserUuid, request: QuoteRequest) -> Result<Quote, OrdersServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin().await?;

        let cart = price_cart(&mut tx, &self.carts, &self.catalog, user).await?;

        let balance = self.loyalty.summary(&mut tx, user).await?;

        ensure_redeemable(&balance, request.loyalty_points_used)?;

        let promo = evaluate_promo(
            &mut tx,
            &self.promotions,
            request.promo_code.as_deref(),
            cart.subtotal(),
            now,
        )
        .await?;

        tx.commit().await?;

        let totals = compute_totals(
            &cart.priced_lines(),
            promo.outcome.discount(),
            request.loyalty_points_used,
            &self.settings.pricing,
        );

        Ok(Quote {
            lines: cart.quoted_lines(),
            promo: promo.outcome,
            totals,
        })
    }

    #[tracing::instrument(
        name = "orders.service.commit_order",
        skip(self, request),
        fields(
            user_uuid = %customer,
            order_type = %request.order_type,
            points_used = request.loyalty_points_used,
            order_uuid = field::Empty,
        ),
        err
    )]
    async fn commit_order(
        &self,
        customer: UserUuid,
        request: CheckoutRequest,
    ) -> Result<OrderUuid, OrdersServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin_write().await?;

        if let Some(key) = request.idempotency_key.as_deref() {
            let existing = self
                .orders
                .find_by_idempotency_key(&mut tx, customer, key)
                .await?;

            if let Some(existing) = existing {
                Span::current().record("order_uuid", field::display(existing));
                info!("order already placed with this idempotency key");

                return Ok(existing);
            }
        }

        let cart = price_cart(&mut tx, &self.carts, &self.catalog, customer).await?;

        ensure_deliverable(request.order_type, request.delivery_address.as_ref())?;

        let balance = self.loyalty.summary(&mut tx, customer).await?;

        ensure_redeemable(&balance, request.loyalty_points_used)?;

        let promo = evaluate_promo(
            &mut tx,
            &self.promotions,
            request.promo_code.as_deref(),
            cart.subtotal(),
            now,
        )
        .await?;

        if let PromoOutcome::NotApplied { code, reason } = &promo.outcome {
            if self.settings.promo_policy == PromoPolicy::Strict {
                return Err(OrdersServiceError::InvalidPromoCode {
                    code: code.clone(),
                    reason: reason.clone(),
                });
            }

            warn!(code = %code, reason = %reason, "promo code not applied");
        }

        let totals = compute_totals(
            &cart.priced_lines(),
            promo.outcome.discount(),
            request.loyalty_points_used,
            &self.settings.pricing,
        );

        if let Some(applied) = promo.applied {
            let counted = self
                .promotions
                .try_increment_usage(&mut tx, applied, now)
                .await
                .map_err(OrdersServiceError::commit_failed)?;

            if counted == 0 {
                return Err(OrdersServiceError::Conflict);
            }
        }

        let order_number = unique_order_number(&mut tx, &self.orders, now, random_suffix).await?;

        let order = Order {
            uuid: OrderUuid::new(),
            order_number,
            customer,
            status: OrderStatus::Pending,
            order_type: request.order_type,
            payment_method: request.payment_method,
            payment_status: PAYMENT_PENDING.to_string(),
            customer_notes: request.customer_notes,
            delivery_address: request.delivery_address,
            promo_code: request.promo_code.filter(|code| !code.is_empty()),
            lines: cart.order_lines(),
            subtotal: totals.subtotal,
            discount: totals.discount,
            tax: totals.tax,
            total_amount: totals.total,
            loyalty_points_used: totals.points_used,
            loyalty_points_earned: totals.points_earned,
            estimated_ready_time: now
                .checked_add(self.settings.preparation_time)
                .unwrap_or(Timestamp::MAX),
            idempotency_key: request.idempotency_key,
            created_at: now,
            updated_at: now,
        };

        self.orders
            .insert_order(&mut tx, &order)
            .await
            .map_err(OrdersServiceError::commit_failed)?;

        if totals.points_earned > 0 {
            self.loyalty
                .post_credit(
                    &mut tx,
                    NewLoyaltyTransaction {
                        user: customer,
                        order: Some(order.uuid),
                        kind: TransactionKind::Earned,
                        points: totals.points_earned,
                        description: format!("Points earned from order {}", order.order_number),
                    },
                    now,
                )
                .await
                .map_err(OrdersServiceError::commit_failed)?;
        }

        if totals.points_used > 0 {
            let redeemed = self
                .loyalty
                .post_redemption(
                    &mut tx,
                    customer,
                    order.uuid,
                    totals.points_used,
                    &format!("Points redeemed for order {}", order.order_number),
                    now,
                )
                .await
                .map_err(OrdersServiceError::commit_failed)?;

            if redeemed == 0 {
                return Err(OrdersServiceError::Conflict);
            }
        }

        let cleared = self
            .carts
            .clear(&mut tx, customer)
            .await
            .map_err(OrdersServiceError::commit_failed)?;

        if usize::try_from(cleared).ok() != Some(cart.len()) {
            return Err(OrdersServiceError::Conflict);
        }

        tx.commit()
            .await
            .map_err(OrdersServiceError::commit_failed)?;

        Span::current().record("order_uuid", field::display(order.uuid));

        info!(
            order_number = %order.order_number,
            subtotal = %totals.subtotal,
            discount = %totals.discount,
            tax = %totals.tax,
            total = %totals.total,
            points_earned = totals.points_earned,
            "order placed"
        );

        Ok(order.uuid)
    }

    #[tracing::instrument(
        name = "orders.service.get_order",
        skip(self, caller),
        fields(user_uuid = %caller.user, order_uuid = %order),
        err
    )]
    async fn get_order(&self, caller: Caller, order: OrderUuid) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let found = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        if found.customer != caller.user && !caller.can(Permission::OrdersView) {
            return Err(OrdersServiceError::Forbidden);
        }

        Ok(found)
    }

    async fn list_own_orders(&self, customer: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_customer_orders(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders.list_orders(&mut tx, status).await?;

        tx.commit().await?;

        Ok(orders)
    }

    #[tracing::instrument(
        name = "orders.service.update_order_status",
        skip(self, update),
        fields(order_uuid = %order, status = %update.status),
        err
    )]
    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<Order, OrdersServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin_write().await?;

        let current = self.orders.get_order(&mut tx, order).await?;

        let next = current
            .status
            .transition_to(update.status, self.settings.transition_policy)?;

        let rows_affected = self
            .orders
            .update_status(
                &mut tx,
                order,
                current.status,
                next,
                update.estimated_ready_time,
                now,
            )
            .await?;

        if rows_affected == 0 {
            return Err(OrdersServiceError::Conflict);
        }

        let updated = self.orders.get_order(&mut tx, order).await?;

        tx.commit().await?;

        info!(from = %current.status, to = %next, "order status changed");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "orders.service.reorder",
        skip(self),
        fields(user_uuid = %customer, order_uuid = %order),
        err
    )]
    async fn reorder(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<Vec<CartLine>, OrdersServiceError> {
        let now = Timestamp::now();
        let mut tx = self.db.begin_write().await?;

        let previous = self.orders.get_order(&mut tx, order).await?;

        if previous.customer != customer {
            return Err(OrdersServiceError::NotFound);
        }

        self.carts.clear(&mut tx, customer).await?;

        for line in previous.lines {
            let available = self
                .catalog
                .find_item(&mut tx, line.menu_item)
                .await?
                .is_some_and(|item| item.item.available);

            if !available {
                continue;
            }

            self.carts
                .upsert_line(
                    &mut tx,
                    customer,
                    NewCartLine {
                        menu_item: line.menu_item,
                        size: line.size,
                        quantity: line.quantity,
                        notes: line.notes,
                    },
                    now,
                )
                .await?;
        }

        let lines = self.carts.list_lines(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(lines)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Price the user's cart as checkout would, without recording anything.
    async fn quote(&self, user: UserUuid, request: QuoteRequest) -> Result<Quote, OrdersServiceError>;

    /// Turn the customer's cart into an order.
    ///
    /// Promo usage, the order and its lines, the loyalty postings and the
    /// emptied cart are committed together or not at all.
    async fn commit_order(
        &self,
        customer: UserUuid,
        request: CheckoutRequest,
    ) -> Result<OrderUuid, OrdersServiceError>;

    /// Retrieve an order visible to `caller`.
    async fn get_order(&self, caller: Caller, order: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// The customer's orders, newest first.
    async fn list_own_orders(&self, customer: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Every order, optionally filtered by status, newest first.
    async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order through its lifecycle.
    async fn update_order_status(
        &self,
        order: OrderUuid,
        update: StatusUpdate,
    ) -> Result<Order, OrdersServiceError>;

    /// Replace the customer's cart with the still-available lines of a past
    /// order.
    async fn reorder(
        &self,
        customer: UserUuid,
        order: OrderUuid,
    ) -> Result<Vec<CartLine>, OrdersServiceError>;
}
