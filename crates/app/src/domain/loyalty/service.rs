//! Loyalty service.

use async_trait::async_trait;
use brewline::loyalty::{LoyaltySummary, TransactionKind};
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        loyalty::{
            errors::LoyaltyServiceError,
            models::{LoyaltyTransaction, NewLoyaltyTransaction},
            repository::SqliteLoyaltyRepository,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteLoyaltyService {
    db: Db,
    repository: SqliteLoyaltyRepository,
}

impl SqliteLoyaltyService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteLoyaltyRepository::new(),
        }
    }
}

#[async_trait]
impl LoyaltyService for SqliteLoyaltyService {
    async fn get_balance(&self, user: UserUuid) -> Result<LoyaltySummary, LoyaltyServiceError> {
        let mut tx = self.db.begin().await?;

        let summary = self.repository.summary(&mut tx, user).await?;

        tx.commit().await?;

        Ok(summary)
    }

    async fn list_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<LoyaltyTransaction>, LoyaltyServiceError> {
        let mut tx = self.db.begin().await?;

        let transactions = self.repository.list_transactions(&mut tx, user).await?;

        tx.commit().await?;

        Ok(transactions)
    }

    #[tracing::instrument(
        name = "loyalty.service.post_bonus",
        skip(self, description),
        fields(user_uuid = %user, points),
        err
    )]
    async fn post_bonus(
        &self,
        user: UserUuid,
        points: u32,
        description: String,
    ) -> Result<LoyaltyTransaction, LoyaltyServiceError> {
        if points == 0 {
            return Err(LoyaltyServiceError::InvalidPoints);
        }

        if description.trim().is_empty() {
            return Err(LoyaltyServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_write().await?;

        let posted = self
            .repository
            .post_credit(
                &mut tx,
                NewLoyaltyTransaction {
                    user,
                    order: None,
                    kind: TransactionKind::Bonus,
                    points,
                    description,
                },
                Timestamp::now(),
            )
            .await?;

        tx.commit().await?;

        Ok(posted)
    }
}

#[automock]
#[async_trait]
pub trait LoyaltyService: Send + Sync {
    /// Current balance with lifetime earned and redeemed totals.
    async fn get_balance(&self, user: UserUuid) -> Result<LoyaltySummary, LoyaltyServiceError>;

    /// Ledger entries, newest first.
    async fn list_transactions(
        &self,
        user: UserUuid,
    ) -> Result<Vec<LoyaltyTransaction>, LoyaltyServiceError>;

    /// Grant points outside of an order.
    async fn post_bonus(
        &self,
        user: UserUuid,
        points: u32,
        description: String,
    ) -> Result<LoyaltyTransaction, LoyaltyServiceError>;
}

#[cfg(test)]
mod tests {
    use brewline::roles::Role;
    use testresult::TestResult;

    use crate::{domain::users::models::UserUuid, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn new_users_have_an_empty_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", Role::Customer).await?;

        assert_eq!(ctx.loyalty.get_balance(user.uuid).await?, LoyaltySummary::default());
        assert!(ctx.loyalty.list_transactions(user.uuid).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn bonuses_add_to_the_balance() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", Role::Customer).await?;

        ctx.loyalty
            .post_bonus(user.uuid, 50, "Welcome bonus".to_string())
            .await?;
        ctx.loyalty
            .post_bonus(user.uuid, 25, "Birthday".to_string())
            .await?;

        let summary = ctx.loyalty.get_balance(user.uuid).await?;

        assert_eq!(summary.total_points, 75);
        assert_eq!(summary.total_earned, 75);
        assert_eq!(summary.total_redeemed, 0);

        let transactions = ctx.loyalty.list_transactions(user.uuid).await?;

        assert_eq!(transactions[0].description, "Birthday");
        assert_eq!(transactions[0].kind, TransactionKind::Bonus);
        assert!(transactions[0].order.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn zero_point_bonus_is_rejected() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", Role::Customer).await?;

        let result = ctx
            .loyalty
            .post_bonus(user.uuid, 0, "Nothing".to_string())
            .await;

        assert!(matches!(result, Err(LoyaltyServiceError::InvalidPoints)));

        Ok(())
    }

    #[tokio::test]
    async fn bonus_for_unknown_user_is_invalid_reference() {
        let ctx = TestContext::new().await;

        let result = ctx
            .loyalty
            .post_bonus(UserUuid::new(), 10, "Ghost".to_string())
            .await;

        assert!(matches!(result, Err(LoyaltyServiceError::InvalidReference)));
    }

    #[tokio::test]
    async fn ledger_entries_cannot_be_rewritten() -> TestResult {
        let ctx = TestContext::new().await;
        let user = ctx.create_user("Ada", Role::Customer).await?;

        ctx.loyalty
            .post_bonus(user.uuid, 50, "Welcome bonus".to_string())
            .await?;

        let update = sqlx::query("UPDATE loyalty_transactions SET points = 5000")
            .execute(ctx.db.pool())
            .await;

        let delete = sqlx::query("DELETE FROM loyalty_transactions")
            .execute(ctx.db.pool())
            .await;

        assert!(update.is_err());
        assert!(delete.is_err());
        assert_eq!(ctx.loyalty.get_balance(user.uuid).await?.total_points, 50);

        Ok(())
    }
}
