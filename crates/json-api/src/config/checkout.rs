//! Checkout Config

use brewline::{orders::TransitionPolicy, pricing::PricingConfig, promotions::PromoPolicy};
use brewline_app::settings::{CheckoutSettings, DEFAULT_PREPARATION_MINUTES};
use clap::Args;
use jiff::SignedDuration;
use rust_decimal::Decimal;

/// What happens when a customer supplies a promo code that cannot be used.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum PromoPolicyArg {
    /// Checkout continues without the discount.
    Lenient,

    /// Checkout is rejected.
    Strict,
}

/// Which order status changes staff may make.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum TransitionPolicyArg {
    /// Only forward steps and cancellation.
    Strict,

    /// Any status to any status.
    Permissive,
}

/// Pricing and order workflow settings.
#[derive(Debug, Args)]
pub struct CheckoutConfig {
    /// Tax rate applied to the discounted subtotal
    #[arg(long, env = "TAX_RATE", default_value_t = PricingConfig::DEFAULT_TAX_RATE)]
    pub tax_rate: Decimal,

    /// Currency value of one loyalty point
    #[arg(
        long,
        env = "POINTS_REDEMPTION_RATE",
        default_value_t = PricingConfig::DEFAULT_POINTS_REDEMPTION_RATE
    )]
    pub points_redemption_rate: Decimal,

    /// Minutes between placing an order and it being ready
    #[arg(long, env = "PREPARATION_MINUTES", default_value_t = DEFAULT_PREPARATION_MINUTES)]
    pub preparation_minutes: i64,

    /// Promo code policy (lenient, strict)
    #[arg(long, env = "PROMO_POLICY", value_enum, default_value_t = PromoPolicyArg::Lenient)]
    pub promo_policy: PromoPolicyArg,

    /// Order status transitions (strict, permissive)
    #[arg(
        long,
        env = "STATUS_TRANSITIONS",
        value_enum,
        default_value_t = TransitionPolicyArg::Strict
    )]
    pub status_transitions: TransitionPolicyArg,
}

impl CheckoutConfig {
    #[must_use]
    pub fn settings(&self) -> CheckoutSettings {
        CheckoutSettings {
            pricing: PricingConfig {
                tax_rate: self.tax_rate,
                points_redemption_rate: self.points_redemption_rate,
            },
            promo_policy: match self.promo_policy {
                PromoPolicyArg::Lenient => PromoPolicy::Lenient,
                PromoPolicyArg::Strict => PromoPolicy::Strict,
            },
            transition_policy: match self.status_transitions {
                TransitionPolicyArg::Strict => TransitionPolicy::Strict,
                TransitionPolicyArg::Permissive => TransitionPolicy::Permissive,
            },
            preparation_time: SignedDuration::from_mins(self.preparation_minutes),
        }
    }
}
