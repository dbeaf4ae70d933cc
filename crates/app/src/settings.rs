//! Checkout Settings

use brewline::{orders::TransitionPolicy, pricing::PricingConfig, promotions::PromoPolicy};
use jiff::SignedDuration;

/// Default lead time between placing an order and it being ready.
pub const DEFAULT_PREPARATION_MINUTES: i64 = 20;

/// Store-wide knobs consulted by checkout and order fulfilment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSettings {
    pub pricing: PricingConfig,
    pub promo_policy: PromoPolicy,
    pub transition_policy: TransitionPolicy,
    pub preparation_time: SignedDuration,
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            promo_policy: PromoPolicy::default(),
            transition_policy: TransitionPolicy::default(),
            preparation_time: SignedDuration::from_mins(DEFAULT_PREPARATION_MINUTES),
        }
    }
}
