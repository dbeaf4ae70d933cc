//! Test helpers.

use std::sync::Arc;

use brewline::roles::Role;
use brewline_app::{
    context::AppContext,
    domain::{
        carts::MockCartsService,
        catalog::MockCatalogService,
        loyalty::MockLoyaltyService,
        orders::MockOrdersService,
        promotions::MockPromotionsService,
        reviews::MockReviewsService,
        users::{
            MockUsersService,
            models::{Caller, UserUuid},
        },
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

/// One mock per service. Any call without a matching expectation fails the
/// test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) users: MockUsersService,
    pub(crate) catalog: MockCatalogService,
    pub(crate) carts: MockCartsService,
    pub(crate) promotions: MockPromotionsService,
    pub(crate) loyalty: MockLoyaltyService,
    pub(crate) orders: MockOrdersService,
    pub(crate) reviews: MockReviewsService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            users: Arc::new(self.users),
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            promotions: Arc::new(self.promotions),
            loyalty: Arc::new(self.loyalty),
            orders: Arc::new(self.orders),
            reviews: Arc::new(self.reviews),
        })
    }
}

/// Stands in for the auth middleware.
struct InjectCaller(Caller);

#[handler]
impl InjectCaller {
    async fn handle(&self, req: &mut Request, depot: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
        depot.insert_caller(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn caller(role: Role) -> Caller {
    Caller {
        user: TEST_USER_UUID,
        role,
    }
}

/// Serve `route` as the test user with `role`.
pub(crate) fn service_as(role: Role, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectCaller(caller(role)))
            .push(route),
    )
}
