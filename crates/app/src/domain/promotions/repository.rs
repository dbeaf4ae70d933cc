//! Promo Codes Repository

use brewline::promotions::PromoCode;
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    columns::{
        decimal_value, timestamp_value, try_get_count, try_get_decimal, try_get_optional_count,
        try_get_optional_decimal, try_get_optional_timestamp, try_get_parsed, try_get_timestamp,
    },
    domain::promotions::models::{NewPromoCode, PromoCodeRecord, PromoCodeUuid},
};

const FIND_BY_CODE_SQL: &str = include_str!("sql/find_by_code.sql");
const LIST_PROMO_CODES_SQL: &str = include_str!("sql/list_promo_codes.sql");
const CREATE_PROMO_CODE_SQL: &str = include_str!("sql/create_promo_code.sql");
const SET_ACTIVE_SQL: &str = include_str!("sql/set_active.sql");
const INCREMENT_USAGE_SQL: &str = include_str!("sql/increment_usage.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqlitePromotionsRepository;

impl SqlitePromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Look up a code by exact, case-sensitive value.
    pub(crate) async fn find_by_code(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
    ) -> Result<Option<PromoCodeRecord>, sqlx::Error> {
        query_as::<Sqlite, PromoCodeRecord>(FIND_BY_CODE_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_promo_codes(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
    ) -> Result<Vec<PromoCodeRecord>, sqlx::Error> {
        query_as::<Sqlite, PromoCodeRecord>(LIST_PROMO_CODES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn create_promo_code(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        promo: NewPromoCode,
        now: Timestamp,
    ) -> Result<PromoCodeRecord, sqlx::Error> {
        query_as::<Sqlite, PromoCodeRecord>(CREATE_PROMO_CODE_SQL)
            .bind(promo.uuid.into_uuid())
            .bind(promo.code)
            .bind(promo.description)
            .bind(promo.kind.as_str())
            .bind(decimal_value(promo.value))
            .bind(promo.min_order_amount.map(decimal_value))
            .bind(promo.max_discount.map(decimal_value))
            .bind(promo.valid_from.map(timestamp_value))
            .bind(promo.valid_until.map(timestamp_value))
            .bind(promo.usage_limit.map(i64::from))
            .bind(promo.active)
            .bind(timestamp_value(now))
            .bind(timestamp_value(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_active(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        code: &str,
        active: bool,
        now: Timestamp,
    ) -> Result<PromoCodeRecord, sqlx::Error> {
        query_as::<Sqlite, PromoCodeRecord>(SET_ACTIVE_SQL)
            .bind(active)
            .bind(timestamp_value(now))
            .bind(code)
            .fetch_one(&mut **tx)
            .await
    }

    /// Count one more use of the code, unless it is inactive or its usage
    /// limit has been reached in the meantime.
    ///
    /// Returns the number of rows updated: `0` means the use was refused.
    pub(crate) async fn try_increment_usage(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        promo: PromoCodeUuid,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(INCREMENT_USAGE_SQL)
            .bind(timestamp_value(now))
            .bind(promo.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for PromoCodeRecord {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: PromoCodeUuid::from_uuid(row.try_get("uuid")?),
            description: row.try_get("description")?,
            rules: PromoCode {
                code: row.try_get("code")?,
                kind: try_get_parsed(row, "discount_kind")?,
                value: try_get_decimal(row, "discount_value")?,
                min_order_amount: try_get_optional_decimal(row, "min_order_amount")?,
                max_discount: try_get_optional_decimal(row, "max_discount")?,
                valid_from: try_get_optional_timestamp(row, "valid_from")?,
                valid_until: try_get_optional_timestamp(row, "valid_until")?,
                usage_limit: try_get_optional_count(row, "usage_limit")?,
                used_count: try_get_count(row, "used_count")?,
                active: row.try_get("is_active")?,
            },
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
