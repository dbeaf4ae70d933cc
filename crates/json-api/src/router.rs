//! App Router

use salvo::Router;

use crate::{auth, cart, loyalty, menu, orders, promo_codes, reviews, staff};

/// Every authenticated route. Path parameter names match the handler
/// argument names.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("menu")
                .get(menu::index::handler)
                .post(menu::create::handler)
                .push(Router::with_path("{item}/availability").put(menu::availability::handler)),
        )
        .push(
            Router::with_path("promo-codes/{code}/preview").get(promo_codes::preview::handler),
        )
        .push(
            Router::with_path("cart")
                .get(cart::index::handler)
                .post(cart::create::handler)
                .delete(cart::clear::handler)
                .push(
                    Router::with_path("{line}")
                        .put(cart::update::handler)
                        .delete(cart::delete::handler),
                ),
        )
        .push(Router::with_path("checkout/quote").post(orders::quote::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("reorder").post(orders::reorder::handler))
                        .push(
                            Router::with_path("review")
                                .get(reviews::get::handler)
                                .post(reviews::create::handler),
                        ),
                ),
        )
        .push(Router::with_path("reviews").get(reviews::index::handler))
        .push(
            Router::with_path("loyalty")
                .get(loyalty::balance::handler)
                .push(Router::with_path("transactions").get(loyalty::transactions::handler)),
        )
        .push(
            Router::with_path("staff")
                .push(
                    Router::with_path("orders")
                        .get(orders::staff_index::handler)
                        .push(Router::with_path("{order}/status").put(orders::status::handler)),
                )
                .push(Router::with_path("loyalty/{user}/bonus").post(loyalty::bonus::handler))
                .push(
                    Router::with_path("users")
                        .get(staff::index::handler)
                        .push(Router::with_path("{user}/role").put(staff::role::handler)),
                )
                .push(
                    Router::with_path("reviews")
                        .get(reviews::staff_index::handler)
                        .push(
                            Router::with_path("{review}/response").put(reviews::respond::handler),
                        ),
                ),
        )
}
