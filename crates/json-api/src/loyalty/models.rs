//! Loyalty wire models

use brewline::loyalty::LoyaltySummary;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::loyalty::models::LoyaltyTransaction;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoyaltyBalanceResponse {
    pub total_points: i64,
    pub total_earned: i64,
    pub total_redeemed: i64,
}

impl From<LoyaltySummary> for LoyaltyBalanceResponse {
    fn from(summary: LoyaltySummary) -> Self {
        LoyaltyBalanceResponse {
            total_points: summary.total_points,
            total_earned: summary.total_earned,
            total_redeemed: summary.total_redeemed,
        }
    }
}

/// Ledger entry. Redemptions are negative.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoyaltyTransactionResponse {
    pub uuid: Uuid,
    pub order_uuid: Option<Uuid>,
    pub points: i64,

    /// earned, redeemed or bonus
    pub kind: String,

    pub description: String,
    pub created_at: String,
}

impl From<LoyaltyTransaction> for LoyaltyTransactionResponse {
    fn from(transaction: LoyaltyTransaction) -> Self {
        LoyaltyTransactionResponse {
            uuid: transaction.uuid.into(),
            order_uuid: transaction.order.map(Into::into),
            points: transaction.points,
            kind: transaction.kind.to_string(),
            description: transaction.description,
            created_at: transaction.created_at.to_string(),
        }
    }
}
