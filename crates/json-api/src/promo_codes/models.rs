//! Promo code wire models

use brewline::promotions::PromoOutcome;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

/// What a promo code contributed, or why it did not.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromoOutcomeResponse {
    /// Code as supplied, absent when none was
    pub code: Option<String>,

    pub applied: bool,

    /// Decimal string, "0" unless applied
    pub discount: String,

    /// Why the code was not applied
    pub reason: Option<String>,
}

impl From<PromoOutcome> for PromoOutcomeResponse {
    fn from(outcome: PromoOutcome) -> Self {
        match outcome {
            PromoOutcome::NotRequested => PromoOutcomeResponse {
                code: None,
                applied: false,
                discount: "0".to_string(),
                reason: None,
            },
            PromoOutcome::Applied { code, discount } => PromoOutcomeResponse {
                code: Some(code),
                applied: true,
                discount: discount.to_string(),
                reason: None,
            },
            PromoOutcome::NotApplied { code, reason } => PromoOutcomeResponse {
                code: Some(code),
                applied: false,
                discount: "0".to_string(),
                reason: Some(reason.to_string()),
            },
        }
    }
}
