//! Loyalty Models

use brewline::loyalty::TransactionKind;
use jiff::Timestamp;

use crate::{
    domain::{orders::models::OrderUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Loyalty Transaction UUID
pub type LoyaltyTransactionUuid = TypedUuid<LoyaltyTransaction>;

/// Immutable ledger entry. Redemptions carry negative points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoyaltyTransaction {
    pub uuid: LoyaltyTransactionUuid,
    pub user: UserUuid,
    pub order: Option<OrderUuid>,
    pub points: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub created_at: Timestamp,
}

/// New Loyalty Transaction Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLoyaltyTransaction {
    pub user: UserUuid,
    pub order: Option<OrderUuid>,
    pub kind: TransactionKind,
    pub points: u32,
    pub description: String,
}
