//! Carts Repository

use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};

use crate::{
    columns::{timestamp_value, try_get_count, try_get_timestamp},
    domain::{
        carts::models::{CartLine, CartLineUuid, NewCartLine},
        catalog::models::MenuItemUuid,
        users::models::UserUuid,
    },
};

const LIST_LINES_SQL: &str = include_str!("sql/list_lines.sql");
const UPSERT_LINE_SQL: &str = include_str!("sql/upsert_line.sql");
const SET_QUANTITY_SQL: &str = include_str!("sql/set_quantity.sql");
const DELETE_LINE_SQL: &str = include_str!("sql/delete_line.sql");
const CLEAR_CART_SQL: &str = include_str!("sql/clear_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCartsRepository;

impl SqliteCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<Vec<CartLine>, sqlx::Error> {
        query_as::<Sqlite, CartLine>(LIST_LINES_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    /// Add a line, merging into an existing line for the same item and size.
    pub(crate) async fn upsert_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        line: NewCartLine,
        now: Timestamp,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Sqlite, CartLine>(UPSERT_LINE_SQL)
            .bind(CartLineUuid::new().into_uuid())
            .bind(user.into_uuid())
            .bind(line.menu_item.into_uuid())
            .bind(line.size)
            .bind(i64::from(line.quantity))
            .bind(line.notes)
            .bind(timestamp_value(now))
            .bind(timestamp_value(now))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn set_quantity(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        line: CartLineUuid,
        quantity: u32,
        now: Timestamp,
    ) -> Result<CartLine, sqlx::Error> {
        query_as::<Sqlite, CartLine>(SET_QUANTITY_SQL)
            .bind(i64::from(quantity))
            .bind(timestamp_value(now))
            .bind(line.into_uuid())
            .bind(user.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_line(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_LINE_SQL)
            .bind(line.into_uuid())
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn clear(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        user: UserUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(CLEAR_CART_SQL)
            .bind(user.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

impl<'r> FromRow<'r, SqliteRow> for CartLine {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CartLineUuid::from_uuid(row.try_get("uuid")?),
            user: UserUuid::from_uuid(row.try_get("user_uuid")?),
            menu_item: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            size: row.try_get("size")?,
            quantity: try_get_count(row, "quantity")?,
            notes: row.try_get("notes")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
