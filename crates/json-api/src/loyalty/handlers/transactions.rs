//! Loyalty Transactions Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    loyalty::{errors::into_status_error, models::LoyaltyTransactionResponse},
    state::State,
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct LoyaltyTransactionsResponse {
    /// Newest first
    pub transactions: Vec<LoyaltyTransactionResponse>,
}

/// Loyalty Transactions Handler
#[endpoint(
    tags("loyalty"),
    summary = "List Loyalty Transactions",
    security(("bearer_auth" = [])),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<LoyaltyTransactionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let caller = depot.caller_or_401()?;

    let transactions = state
        .app
        .loyalty
        .list_transactions(caller.user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(LoyaltyTransactionsResponse {
        transactions: transactions.into_iter().map(Into::into).collect(),
    }))
}
