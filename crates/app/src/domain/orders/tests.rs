use brewline::{
    loyalty::TransactionKind,
    orders::{DeliveryAddress, OrderStatus, OrderType, TransitionPolicy},
    promotions::{DiscountKind, Ineligibility, PromoOutcome, PromoPolicy},
    roles::Role,
};
use jiff::SignedDuration;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use testresult::TestResult;

use crate::{
    domain::{
        carts::{CartsService, models::NewCartLine},
        catalog::{CatalogService, models::MenuItemUuid},
        loyalty::LoyaltyService,
        orders::{
            OrdersService, OrdersServiceError,
            models::{CheckoutRequest, OrderUuid, QuoteRequest, StatusUpdate},
        },
        promotions::{
            PromotionsService,
            models::{NewPromoCode, PromoCodeUuid},
        },
        users::models::{Caller, User},
    },
    settings::CheckoutSettings,
    test::TestContext,
};

fn line(menu_item: MenuItemUuid, size: &str, quantity: u32) -> NewCartLine {
    NewCartLine {
        menu_item,
        size: size.to_string(),
        quantity,
        notes: None,
    }
}

fn pickup() -> CheckoutRequest {
    CheckoutRequest {
        order_type: OrderType::Pickup,
        payment_method: "card".to_string(),
        ..CheckoutRequest::default()
    }
}

fn welcome10(usage_limit: Option<u32>) -> NewPromoCode {
    NewPromoCode {
        uuid: PromoCodeUuid::new(),
        code: "WELCOME10".to_string(),
        description: "10% off".to_string(),
        kind: DiscountKind::Percentage,
        value: dec!(10),
        min_order_amount: None,
        max_discount: None,
        valid_from: None,
        valid_until: None,
        usage_limit,
        active: true,
    }
}

fn caller(user: &User) -> Caller {
    Caller {
        user: user.uuid,
        role: user.role,
    }
}

/// Customer with two medium lattes (11.00) in the cart.
async fn customer_with_lattes(ctx: &TestContext, name: &str) -> TestResult<(User, MenuItemUuid)> {
    let user = ctx.create_user(name, Role::Customer).await?;
    let latte = match ctx.catalog.list_items(true).await?.into_iter().next() {
        Some(latte) => latte,
        None => ctx.create_latte().await?,
    };

    ctx.carts
        .add_line(user.uuid, line(latte.uuid, "medium", 2))
        .await?;

    Ok((user, latte.uuid))
}

#[tokio::test]
async fn checkout_freezes_totals_and_credits_points() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, latte) = customer_with_lattes(&ctx, "Ada").await?;

    let uuid = ctx.orders.commit_order(user.uuid, pickup()).await?;
    let order = ctx.orders.get_order(caller(&user), uuid).await?;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.payment_status, "pending");
    assert_eq!(order.subtotal, dec!(11.00));
    assert_eq!(order.discount, Decimal::ZERO);
    assert_eq!(order.tax, dec!(0.88));
    assert_eq!(order.total_amount, dec!(11.88));
    assert_eq!(order.loyalty_points_earned, 11);
    assert!(order.order_number.starts_with("CF"));
    assert_eq!(
        order.estimated_ready_time,
        order.created_at + SignedDuration::from_mins(20)
    );

    assert_eq!(order.lines.len(), 1);
    assert_eq!(order.lines[0].menu_item, latte);
    assert_eq!(order.lines[0].name, "Latte");
    assert_eq!(order.lines[0].unit_price, dec!(5.50));
    assert_eq!(order.lines[0].line_total, dec!(11.00));

    assert!(ctx.carts.list_lines(user.uuid).await?.is_empty());
    assert_eq!(ctx.loyalty.get_balance(user.uuid).await?.total_points, 11);

    Ok(())
}

#[tokio::test]
async fn checkout_posts_exactly_the_orders_ledger_entries() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    ctx.loyalty
        .post_bonus(user.uuid, 600, "Welcome bonus".to_string())
        .await?;

    let uuid = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                loyalty_points_used: 500,
                ..pickup()
            },
        )
        .await?;

    let order = ctx.orders.get_order(caller(&user), uuid).await?;

    // 11.00 - 5.00 = 6.00, plus 0.48 tax
    assert_eq!(order.discount, dec!(5.00));
    assert_eq!(order.total_amount, dec!(6.48));
    assert_eq!(order.loyalty_points_used, 500);
    assert_eq!(order.loyalty_points_earned, 6);

    let for_order: Vec<_> = ctx
        .loyalty
        .list_transactions(user.uuid)
        .await?
        .into_iter()
        .filter(|entry| entry.order == Some(uuid))
        .collect();

    assert_eq!(for_order.len(), 2);
    assert!(for_order.iter().any(|entry| {
        entry.kind == TransactionKind::Earned
            && entry.points == 6
            && entry.description == format!("Points earned from order {}", order.order_number)
    }));
    assert!(for_order.iter().any(|entry| {
        entry.kind == TransactionKind::Redeemed
            && entry.points == -500
            && entry.description == format!("Points redeemed for order {}", order.order_number)
    }));

    let balance = ctx.loyalty.get_balance(user.uuid).await?;

    assert_eq!(balance.total_points, 600 - 500 + 6);
    assert_eq!(balance.total_redeemed, 500);

    Ok(())
}

#[tokio::test]
async fn promo_discount_counts_one_use() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    ctx.promotions
        .create_promo_code(welcome10(Some(100)))
        .await?;

    let uuid = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                promo_code: Some("WELCOME10".to_string()),
                ..pickup()
            },
        )
        .await?;

    let order = ctx.orders.get_order(caller(&user), uuid).await?;

    assert_eq!(order.discount, dec!(1.10));
    assert_eq!(order.promo_code.as_deref(), Some("WELCOME10"));
    assert_eq!(
        ctx.promotions.get_promo_code("WELCOME10").await?.rules.used_count,
        1
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn usage_limit_holds_under_concurrent_checkouts() -> TestResult {
    let ctx = TestContext::on_disk().await;

    ctx.promotions.create_promo_code(welcome10(Some(2))).await?;

    let mut customers = Vec::new();

    for name in ["Ada", "Brian", "Cleo", "Dara", "Emil", "Fern"] {
        customers.push(customer_with_lattes(&ctx, name).await?.0);
    }

    let mut handles = Vec::new();

    for customer in &customers {
        let orders = ctx.orders.clone();
        let uuid = customer.uuid;

        handles.push(tokio::spawn(async move {
            orders
                .commit_order(
                    uuid,
                    CheckoutRequest {
                        promo_code: Some("WELCOME10".to_string()),
                        ..pickup()
                    },
                )
                .await
        }));
    }

    let mut discounted = 0;
    let mut full_price = 0;

    for (handle, customer) in handles.into_iter().zip(&customers) {
        let uuid = handle.await??;
        let order = ctx.orders.get_order(caller(customer), uuid).await?;

        if order.discount == dec!(1.10) {
            discounted += 1;
        } else {
            assert_eq!(order.discount, Decimal::ZERO);
            assert_eq!(order.total_amount, dec!(11.88));
            full_price += 1;
        }
    }

    assert_eq!(discounted, 2);
    assert_eq!(full_price, 4);
    assert_eq!(
        ctx.promotions.get_promo_code("WELCOME10").await?.rules.used_count,
        2
    );

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn unrelated_customers_check_out_concurrently() -> TestResult {
    let ctx = TestContext::on_disk().await;

    let mut customers = Vec::new();

    for name in ["Ada", "Brian", "Cleo", "Dara", "Emil", "Fern", "Gus", "Hana"] {
        customers.push(customer_with_lattes(&ctx, name).await?.0);
    }

    let mut handles = Vec::new();

    for customer in &customers {
        let orders = ctx.orders.clone();
        let uuid = customer.uuid;

        handles.push(tokio::spawn(
            async move { orders.commit_order(uuid, pickup()).await },
        ));
    }

    for (handle, customer) in handles.into_iter().zip(&customers) {
        let uuid = handle.await??;
        let order = ctx.orders.get_order(caller(customer), uuid).await?;

        assert_eq!(order.total_amount, dec!(11.88));
        assert!(ctx.carts.list_lines(customer.uuid).await?.is_empty());
        assert_eq!(ctx.loyalty.get_balance(customer.uuid).await?.total_points, 11);
    }

    assert_eq!(ctx.orders.list_orders(None).await?.len(), customers.len());

    Ok(())
}

#[tokio::test]
async fn failure_after_promo_increment_rolls_everything_back() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    ctx.promotions
        .create_promo_code(welcome10(Some(100)))
        .await?;
    ctx.loyalty
        .post_bonus(user.uuid, 600, "Welcome bonus".to_string())
        .await?;

    // Emptying the cart is the last write of checkout.
    sqlx::query(
        "CREATE TRIGGER cart_lines_locked BEFORE DELETE ON cart_lines \
         BEGIN SELECT RAISE(ABORT, 'cart is locked'); END",
    )
    .execute(ctx.db.pool())
    .await?;

    let result = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                promo_code: Some("WELCOME10".to_string()),
                loyalty_points_used: 500,
                ..pickup()
            },
        )
        .await;

    assert!(
        matches!(result, Err(OrdersServiceError::CommitFailed(_))),
        "expected CommitFailed, got {result:?}"
    );
    assert_eq!(
        ctx.promotions.get_promo_code("WELCOME10").await?.rules.used_count,
        0
    );
    assert_eq!(ctx.carts.list_lines(user.uuid).await?.len(), 1);
    assert!(ctx.orders.list_own_orders(user.uuid).await?.is_empty());

    let ledger = ctx.loyalty.list_transactions(user.uuid).await?;

    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].kind, TransactionKind::Bonus);
    assert_eq!(ctx.loyalty.get_balance(user.uuid).await?.total_points, 600);

    Ok(())
}

#[tokio::test]
async fn unavailable_item_leaves_everything_untouched() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, latte) = customer_with_lattes(&ctx, "Ada").await?;

    ctx.promotions
        .create_promo_code(welcome10(Some(100)))
        .await?;
    ctx.catalog.set_availability(latte, false).await?;

    let result = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                promo_code: Some("WELCOME10".to_string()),
                ..pickup()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(OrdersServiceError::ItemUnavailable { ref item }) if item == "Latte"
    ));
    assert_eq!(ctx.carts.list_lines(user.uuid).await?.len(), 1);
    assert!(ctx.orders.list_own_orders(user.uuid).await?.is_empty());
    assert!(ctx.loyalty.list_transactions(user.uuid).await?.is_empty());
    assert_eq!(
        ctx.promotions.get_promo_code("WELCOME10").await?.rules.used_count,
        0
    );

    Ok(())
}

#[tokio::test]
async fn empty_cart_cannot_be_checked_out() -> TestResult {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", Role::Customer).await?;

    let result = ctx.orders.commit_order(user.uuid, pickup()).await;

    assert!(matches!(result, Err(OrdersServiceError::EmptyCart)));

    Ok(())
}

#[tokio::test]
async fn delivery_needs_a_complete_address() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    let result = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                order_type: OrderType::Delivery,
                delivery_address: Some(DeliveryAddress {
                    street: "1 Bean St".to_string(),
                    city: String::new(),
                    zip_code: "12345".to_string(),
                    phone: "555-0100".to_string(),
                }),
                ..pickup()
            },
        )
        .await;

    assert!(matches!(result, Err(OrdersServiceError::IncompleteAddress)));
    assert_eq!(ctx.carts.list_lines(user.uuid).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn delivery_address_is_stored_with_the_order() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    let address = DeliveryAddress {
        street: "1 Bean St".to_string(),
        city: "Portland".to_string(),
        zip_code: "97201".to_string(),
        phone: "555-0100".to_string(),
    };

    let uuid = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                order_type: OrderType::Delivery,
                delivery_address: Some(address.clone()),
                ..pickup()
            },
        )
        .await?;

    let order = ctx.orders.get_order(caller(&user), uuid).await?;

    assert_eq!(order.order_type, OrderType::Delivery);
    assert_eq!(order.delivery_address, Some(address));

    Ok(())
}

#[tokio::test]
async fn redeeming_more_than_the_balance_fails() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    let result = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                loyalty_points_used: 10,
                ..pickup()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(OrdersServiceError::InsufficientPoints {
            requested: 10,
            available: 0
        })
    ));
    assert_eq!(ctx.carts.list_lines(user.uuid).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn unknown_promo_is_ignored_by_default() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    let uuid = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                promo_code: Some("NOPE".to_string()),
                ..pickup()
            },
        )
        .await?;

    let order = ctx.orders.get_order(caller(&user), uuid).await?;

    assert_eq!(order.discount, Decimal::ZERO);
    assert_eq!(order.total_amount, dec!(11.88));

    Ok(())
}

#[tokio::test]
async fn strict_policy_rejects_unusable_promo() -> TestResult {
    let ctx = TestContext::with_settings(CheckoutSettings {
        promo_policy: PromoPolicy::Strict,
        ..CheckoutSettings::default()
    })
    .await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    let result = ctx
        .orders
        .commit_order(
            user.uuid,
            CheckoutRequest {
                promo_code: Some("NOPE".to_string()),
                ..pickup()
            },
        )
        .await;

    assert!(matches!(
        result,
        Err(OrdersServiceError::InvalidPromoCode {
            ref code,
            reason: Ineligibility::Unknown,
        }) if code == "NOPE"
    ));
    assert_eq!(ctx.carts.list_lines(user.uuid).await?.len(), 1);

    Ok(())
}

#[tokio::test]
async fn repeated_idempotency_key_returns_the_same_order() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    let request = CheckoutRequest {
        idempotency_key: Some("checkout-1".to_string()),
        ..pickup()
    };

    let first = ctx.orders.commit_order(user.uuid, request.clone()).await?;
    let second = ctx.orders.commit_order(user.uuid, request).await?;

    assert_eq!(first, second);
    assert_eq!(ctx.orders.list_own_orders(user.uuid).await?.len(), 1);
    assert_eq!(ctx.loyalty.get_balance(user.uuid).await?.total_points, 11);

    Ok(())
}

#[tokio::test]
async fn quote_matches_checkout_without_recording_anything() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    ctx.promotions
        .create_promo_code(welcome10(Some(100)))
        .await?;

    let quote = ctx
        .orders
        .quote(
            user.uuid,
            QuoteRequest {
                promo_code: Some("WELCOME10".to_string()),
                loyalty_points_used: 0,
            },
        )
        .await?;

    assert_eq!(
        quote.promo,
        PromoOutcome::Applied {
            code: "WELCOME10".to_string(),
            discount: dec!(1.10),
        }
    );
    assert_eq!(quote.totals.subtotal, dec!(11.00));
    assert_eq!(quote.totals.total, dec!(10.692));
    assert_eq!(quote.lines.len(), 1);
    assert_eq!(quote.lines[0].unit_price, dec!(5.50));

    assert_eq!(ctx.carts.list_lines(user.uuid).await?.len(), 1);
    assert!(ctx.orders.list_own_orders(user.uuid).await?.is_empty());
    assert_eq!(
        ctx.promotions.get_promo_code("WELCOME10").await?.rules.used_count,
        0
    );

    Ok(())
}

#[tokio::test]
async fn quote_reports_unusable_promo_even_when_strict() -> TestResult {
    let ctx = TestContext::with_settings(CheckoutSettings {
        promo_policy: PromoPolicy::Strict,
        ..CheckoutSettings::default()
    })
    .await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;

    let quote = ctx
        .orders
        .quote(
            user.uuid,
            QuoteRequest {
                promo_code: Some("NOPE".to_string()),
                loyalty_points_used: 0,
            },
        )
        .await?;

    assert!(matches!(
        quote.promo,
        PromoOutcome::NotApplied {
            reason: Ineligibility::Unknown,
            ..
        }
    ));
    assert_eq!(quote.totals.discount, Decimal::ZERO);

    Ok(())
}

#[tokio::test]
async fn orders_move_through_their_lifecycle() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;
    let uuid = ctx.orders.commit_order(user.uuid, pickup()).await?;

    let confirmed = ctx
        .orders
        .update_order_status(
            uuid,
            StatusUpdate {
                status: OrderStatus::Confirmed,
                estimated_ready_time: None,
            },
        )
        .await?;

    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    let skipped = ctx
        .orders
        .update_order_status(
            uuid,
            StatusUpdate {
                status: OrderStatus::Completed,
                estimated_ready_time: None,
            },
        )
        .await;

    assert!(matches!(
        skipped,
        Err(OrdersServiceError::InvalidTransition(_))
    ));

    let cancelled = ctx
        .orders
        .update_order_status(
            uuid,
            StatusUpdate {
                status: OrderStatus::Cancelled,
                estimated_ready_time: None,
            },
        )
        .await?;

    assert_eq!(cancelled.status, OrderStatus::Cancelled);

    let reopened = ctx
        .orders
        .update_order_status(
            uuid,
            StatusUpdate {
                status: OrderStatus::Pending,
                estimated_ready_time: None,
            },
        )
        .await;

    assert!(matches!(
        reopened,
        Err(OrdersServiceError::InvalidTransition(_))
    ));

    Ok(())
}

#[tokio::test]
async fn status_update_can_move_the_ready_time() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;
    let uuid = ctx.orders.commit_order(user.uuid, pickup()).await?;
    let placed = ctx.orders.get_order(caller(&user), uuid).await?;

    let later = placed.estimated_ready_time + SignedDuration::from_mins(15);

    let confirmed = ctx
        .orders
        .update_order_status(
            uuid,
            StatusUpdate {
                status: OrderStatus::Confirmed,
                estimated_ready_time: Some(later),
            },
        )
        .await?;

    assert_eq!(confirmed.estimated_ready_time, later);

    Ok(())
}

#[tokio::test]
async fn permissive_policy_allows_any_transition() -> TestResult {
    let ctx = TestContext::with_settings(CheckoutSettings {
        transition_policy: TransitionPolicy::Permissive,
        ..CheckoutSettings::default()
    })
    .await;
    let (user, _) = customer_with_lattes(&ctx, "Ada").await?;
    let uuid = ctx.orders.commit_order(user.uuid, pickup()).await?;

    let completed = ctx
        .orders
        .update_order_status(
            uuid,
            StatusUpdate {
                status: OrderStatus::Completed,
                estimated_ready_time: None,
            },
        )
        .await?;

    assert_eq!(completed.status, OrderStatus::Completed);

    Ok(())
}

#[tokio::test]
async fn customers_cannot_see_each_others_orders() -> TestResult {
    let ctx = TestContext::new().await;
    let (ada, _) = customer_with_lattes(&ctx, "Ada").await?;
    let brian = ctx.create_user("Brian", Role::Customer).await?;
    let barista = ctx.create_user("Bea", Role::Barista).await?;

    let uuid = ctx.orders.commit_order(ada.uuid, pickup()).await?;

    let result = ctx.orders.get_order(caller(&brian), uuid).await;

    assert!(matches!(result, Err(OrdersServiceError::Forbidden)));
    assert_eq!(ctx.orders.get_order(caller(&barista), uuid).await?.uuid, uuid);
    assert!(ctx.orders.list_own_orders(brian.uuid).await?.is_empty());

    Ok(())
}

#[tokio::test]
async fn unknown_orders_are_not_found() -> TestResult {
    let ctx = TestContext::new().await;
    let barista = ctx.create_user("Bea", Role::Barista).await?;

    let result = ctx
        .orders
        .get_order(caller(&barista), OrderUuid::new())
        .await;

    assert!(matches!(result, Err(OrdersServiceError::NotFound)));

    Ok(())
}

#[tokio::test]
async fn staff_list_filters_by_status_newest_first() -> TestResult {
    let ctx = TestContext::new().await;
    let (ada, _) = customer_with_lattes(&ctx, "Ada").await?;
    let first = ctx.orders.commit_order(ada.uuid, pickup()).await?;

    let (brian, _) = customer_with_lattes(&ctx, "Brian").await?;
    let second = ctx.orders.commit_order(brian.uuid, pickup()).await?;

    ctx.orders
        .update_order_status(
            first,
            StatusUpdate {
                status: OrderStatus::Confirmed,
                estimated_ready_time: None,
            },
        )
        .await?;

    let all: Vec<_> = ctx
        .orders
        .list_orders(None)
        .await?
        .into_iter()
        .map(|order| order.uuid)
        .collect();

    assert_eq!(all, vec![second, first]);

    let pending = ctx.orders.list_orders(Some(OrderStatus::Pending)).await?;

    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].uuid, second);

    Ok(())
}

#[tokio::test]
async fn reorder_skips_items_no_longer_available() -> TestResult {
    let ctx = TestContext::new().await;
    let (user, latte) = customer_with_lattes(&ctx, "Ada").await?;
    let muffin = ctx.create_item("Muffin", dec!(3.25)).await?;

    ctx.carts
        .add_line(user.uuid, line(muffin.uuid, "regular", 1))
        .await?;

    let uuid = ctx.orders.commit_order(user.uuid, pickup()).await?;

    ctx.catalog.set_availability(muffin.uuid, false).await?;

    let lines = ctx.orders.reorder(user.uuid, uuid).await?;

    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].menu_item, latte);
    assert_eq!(lines[0].size, "medium");
    assert_eq!(lines[0].quantity, 2);

    Ok(())
}

#[tokio::test]
async fn reorder_of_another_customers_order_is_not_found() -> TestResult {
    let ctx = TestContext::new().await;
    let (ada, _) = customer_with_lattes(&ctx, "Ada").await?;
    let brian = ctx.create_user("Brian", Role::Customer).await?;
    let uuid = ctx.orders.commit_order(ada.uuid, pickup()).await?;

    let result = ctx.orders.reorder(brian.uuid, uuid).await;

    assert!(matches!(result, Err(OrdersServiceError::NotFound)));
    assert!(ctx.carts.list_lines(brian.uuid).await?.is_empty());

    Ok(())
}
