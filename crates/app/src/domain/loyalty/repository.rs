//! Loyalty Repository

use brewline::loyalty::{LoyaltySummary, TransactionKind};
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    columns::{timestamp_value, try_get_parsed, try_get_timestamp},
    domain::{
        loyalty::models::{LoyaltyTransaction, LoyaltyTransactionUuid, NewLoyaltyTransaction},
        orders::models::OrderUuid,
        users::models::UserUuid,
    },
};

const LIST_POINTS_SQL: &str = include_str!("sql/list_points.sql");
const LIST_TRANSACTIONS_SQL: &str = include_str!("sql/list_transactions.sql");
const INSERT_TRANSACTION_SQL: &str = include_str!("sql/insert_transaction.sql");
const INSERT_REDEMPTION_SQL: &str = include_str!("sql/insert_redemption.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteLoyaltyRepository;

impl SqliteLoyaltyRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn summary(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<LoyaltySummary, sqlx::Error> {
        let points: Vec<i64> = query_scalar(LIST_POINTS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        Ok(LoyaltySummary::from_points(points))
    }

    pub(crate) async fn list_transactions(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<Vec<LoyaltyTransaction>, sqlx::Error> {
        query_as::<Sqlite, LoyaltyTransaction>(LIST_TRANSACTIONS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Append an `earned` or `bonus` entry.
    pub(crate) async fn post_credit(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        entry: NewLoyaltyTransaction,
        now: Timestamp,
    ) -> Result<LoyaltyTransaction, sqlx::Error> {
        query_as::<Sqlite, LoyaltyTransaction>(INSERT_TRANSACTION_SQL)
            .bind(LoyaltyTransactionUuid::new().into_uuid())
            .bind(entry.user.into_uuid())
            .bind(entry.order.map(OrderUuid::into_uuid))
            .bind(entry.kind.signed_points(entry.points))
            .bind(entry.kind.as_str())
            .bind(entry.description)
            .bind(timestamp_value(now))
            .fetch_one(&mut **tx)
            .await
    }

    /// Append a `redeemed` entry for `order`, provided the user's balance
    /// before the order covers it.
    ///
    /// Returns the number of rows inserted: `0` means the balance fell short.
    pub(crate) async fn post_redemption(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        order: OrderUuid,
        points: u32,
        description: &str,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INSERT_REDEMPTION_SQL)
            .bind(LoyaltyTransactionUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(order.into_uuid())
            .bind(TransactionKind::Redeemed.signed_points(points))
            .bind(description)
            .bind(timestamp_value(now))
            .bind(user.into_uuid())
            .bind(order.into_uuid())
            .bind(i64::from(points))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for LoyaltyTransaction {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: LoyaltyTransactionUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            order: row
                .try_get::<Option<Uuid>, _>("order_uuid")?
                .map(OrderUuid::from_uuid),
            points: row.try_get("points")?,
            kind: try_get_parsed(row, "kind")?,
            description: row.try_get("description")?,
            created_at: try_get_timestamp(row, "created_at")?,
        })
    }
}
