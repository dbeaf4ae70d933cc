//! Orders Repository

use brewline::orders::{DeliveryAddress, OrderStatus};
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, query_scalar, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    columns::{
        decimal_value, timestamp_value, try_get_count, try_get_decimal, try_get_parsed,
        try_get_timestamp,
    },
    domain::{
        catalog::models::MenuItemUuid,
        orders::models::{Order, OrderLine, OrderLineUuid, OrderUuid},
        users::models::UserUuid,
    },
};

const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const INSERT_ORDER_LINE_SQL: &str = include_str!("sql/insert_order_line.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const GET_ORDER_LINES_SQL: &str = include_str!("sql/get_order_lines.sql");
const FIND_BY_IDEMPOTENCY_KEY_SQL: &str = include_str!("sql/find_by_idempotency_key.sql");
const LIST_CUSTOMER_ORDERS_SQL: &str = include_str!("sql/list_customer_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const UPDATE_STATUS_SQL: &str = include_str!("sql/update_status.sql");
const ORDER_NUMBER_TAKEN_SQL: &str = include_str!("sql/order_number_taken.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteOrdersRepository;

impl SqliteOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert an order and its lines.
    pub(crate) async fn insert_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: &Order,
    ) -> Result<(), sqlx::Error> {
        let address = order.delivery_address.as_ref();

        query(INSERT_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(&order.order_number)
            .bind(order.customer.into_uuid())
            .bind(order.status.as_str())
            .bind(order.order_type.as_str())
            .bind(&order.payment_method)
            .bind(&order.payment_status)
            .bind(&order.customer_notes)
            .bind(address.map(|a| a.street.as_str()))
            .bind(address.map(|a| a.city.as_str()))
            .bind(address.map(|a| a.zip_code.as_str()))
            .bind(address.map(|a| a.phone.as_str()))
            .bind(&order.promo_code)
            .bind(decimal_value(order.subtotal))
            .bind(decimal_value(order.discount))
            .bind(decimal_value(order.tax))
            .bind(decimal_value(order.total_amount))
            .bind(i64::from(order.loyalty_points_used))
            .bind(i64::from(order.loyalty_points_earned))
            .bind(timestamp_value(order.estimated_ready_time))
            .bind(&order.idempotency_key)
            .bind(timestamp_value(order.created_at))
            .bind(timestamp_value(order.updated_at))
            .execute(&mut **tx)
            .await?;

        for (position, line) in (0_i64..).zip(&order.lines) {
            query(INSERT_ORDER_LINE_SQL)
                .bind(line.uuid.into_uuid())
                .bind(order.uuid.into_uuid())
                .bind(position)
                .bind(line.menu_item.into_uuid())
                .bind(&line.name)
                .bind(&line.size)
                .bind(i64::from(line.quantity))
                .bind(decimal_value(line.unit_price))
                .bind(decimal_value(line.line_total))
                .bind(&line.notes)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }

    pub(crate) async fn find_by_idempotency_key(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: UserUuid,
        key: &str,
    ) -> Result<Option<OrderUuid>, sqlx::Error> {
        let found: Option<Uuid> = query_scalar(FIND_BY_IDEMPOTENCY_KEY_SQL)
            .bind(customer.into_uuid())
            .bind(key)
            .fetch_optional(&mut **tx)
            .await?;

        Ok(found.map(OrderUuid::from_uuid))
    }

    pub(crate) async fn order_number_taken(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order_number: &str,
    ) -> Result<bool, sqlx::Error> {
        query_scalar(ORDER_NUMBER_TAKEN_SQL)
            .bind(order_number)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_order(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
    ) -> Result<Order, sqlx::Error> {
        let mut found = query_as::<Sqlite, Order>(GET_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        found.lines = self.get_lines(tx, order).await?;

        Ok(found)
    }

    async fn get_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        query_as::<Sqlite, OrderLine>(GET_ORDER_LINES_SQL)
            .bind(order.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    async fn with_lines(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        mut orders: Vec<Order>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        for order in &mut orders {
            order.lines = self.get_lines(tx, order.uuid).await?;
        }

        Ok(orders)
    }

    /// A customer's orders, newest first.
    pub(crate) async fn list_customer_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        customer: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let orders = query_as::<Sqlite, Order>(LIST_CUSTOMER_ORDERS_SQL)
            .bind(customer.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        self.with_lines(tx, orders).await
    }

    /// Every order, optionally in one status, newest first.
    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let status = status.map(OrderStatus::as_str);

        let orders = query_as::<Sqlite, Order>(LIST_ORDERS_SQL)
            .bind(status)
            .bind(status)
            .fetch_all(&mut **tx)
            .await?;

        self.with_lines(tx, orders).await
    }

    /// Move an order from `from` to `to`.
    ///
    /// Returns the number of rows updated: `0` means the order was no longer
    /// in `from`.
    pub(crate) async fn update_status(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        order: OrderUuid,
        from: OrderStatus,
        to: OrderStatus,
        estimated_ready_time: Option<Timestamp>,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(UPDATE_STATUS_SQL)
            .bind(to.as_str())
            .bind(estimated_ready_time.map(timestamp_value))
            .bind(timestamp_value(now))
            .bind(order.into_uuid())
            .bind(from.as_str())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn decode_address(row: &SqliteRow) -> Result<Option<DeliveryAddress>, sqlx::Error> {
    let street: Option<String> = row.try_get("delivery_street")?;

    let Some(street) = street else {
        return Ok(None);
    };

    Ok(Some(DeliveryAddress {
        street,
        city: row.try_get::<Option<String>, _>("delivery_city")?.unwrap_or_default(),
        zip_code: row
            .try_get::<Option<String>, _>("delivery_zip_code")?
            .unwrap_or_default(),
        phone: row.try_get::<Option<String>, _>("delivery_phone")?.unwrap_or_default(),
    }))
}

impl<'r> FromRow<'r, SqliteRow> for Order {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            order_number: row.try_get("order_number")?,
            customer: UserUuid::from_uuid(row.try_get("customer_uuid")?),
            status: try_get_parsed(row, "status")?,
            order_type: try_get_parsed(row, "order_type")?,
            payment_method: row.try_get("payment_method")?,
            payment_status: row.try_get("payment_status")?,
            customer_notes: row.try_get("customer_notes")?,
            delivery_address: decode_address(row)?,
            promo_code: row.try_get("promo_code")?,
            lines: Vec::new(),
            subtotal: try_get_decimal(row, "subtotal")?,
            discount: try_get_decimal(row, "discount")?,
            tax: try_get_decimal(row, "tax")?,
            total_amount: try_get_decimal(row, "total_amount")?,
            loyalty_points_used: try_get_count(row, "loyalty_points_used")?,
            loyalty_points_earned: try_get_count(row, "loyalty_points_earned")?,
            estimated_ready_time: try_get_timestamp(row, "estimated_ready_time")?,
            idempotency_key: row.try_get("idempotency_key")?,
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}

impl<'r> FromRow<'r, SqliteRow> for OrderLine {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: OrderLineUuid::from_uuid(row.try_get("uuid")?),
            menu_item: MenuItemUuid::from_uuid(row.try_get("menu_item_uuid")?),
            name: row.try_get("name")?,
            size: row.try_get("size")?,
            quantity: try_get_count(row, "quantity")?,
            unit_price: try_get_decimal(row, "unit_price")?,
            line_total: try_get_decimal(row, "line_total")?,
            notes: row.try_get("notes")?,
        })
    }
}
