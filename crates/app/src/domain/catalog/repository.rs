//! Catalog Repository

use std::collections::HashMap;

use brewline::catalog::{MenuItem, Variant, Variants};
use jiff::Timestamp;
use sqlx::{FromRow, Row, Sqlite, Transaction, query, query_as, sqlite::SqliteRow};
use uuid::Uuid;

use crate::{
    columns::{decimal_value, timestamp_value, try_get_decimal, try_get_timestamp},
    domain::catalog::models::{CatalogItem, MenuItemUuid, NewCatalogItem},
};

const LIST_ITEMS_SQL: &str = include_str!("sql/list_items.sql");
const LIST_VARIANTS_SQL: &str = include_str!("sql/list_variants.sql");
const GET_ITEM_SQL: &str = include_str!("sql/get_item.sql");
const GET_ITEM_VARIANTS_SQL: &str = include_str!("sql/get_item_variants.sql");
const CREATE_ITEM_SQL: &str = include_str!("sql/create_item.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const SET_AVAILABILITY_SQL: &str = include_str!("sql/set_availability.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct SqliteCatalogRepository;

impl SqliteCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_items(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        include_unavailable: bool,
    ) -> Result<Vec<CatalogItem>, sqlx::Error> {
        let mut items = query_as::<Sqlite, CatalogItem>(LIST_ITEMS_SQL)
            .bind(include_unavailable)
            .fetch_all(&mut **tx)
            .await?;

        let rows = query(LIST_VARIANTS_SQL).fetch_all(&mut **tx).await?;

        let mut variants: HashMap<Uuid, Variants> = HashMap::new();

        for row in &rows {
            let (item, variant) = decode_variant(row)?;

            variants.entry(item).or_default().push(variant);
        }

        for item in &mut items {
            if let Some(found) = variants.remove(&item.uuid.into_uuid()) {
                item.item.variants = found;
            }
        }

        Ok(items)
    }

    pub(crate) async fn get_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: MenuItemUuid,
    ) -> Result<CatalogItem, sqlx::Error> {
        let mut found = query_as::<Sqlite, CatalogItem>(GET_ITEM_SQL)
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        found.item.variants = self.get_variants(tx, item).await?;

        Ok(found)
    }

    /// Like [`Self::get_item`], but a missing item is `None` rather than an error.
    pub(crate) async fn find_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: MenuItemUuid,
    ) -> Result<Option<CatalogItem>, sqlx::Error> {
        match self.get_item(tx, item).await {
            Ok(found) => Ok(Some(found)),
            Err(sqlx::Error::RowNotFound) => Ok(None),
            Err(error) => Err(error),
        }
    }

    async fn get_variants(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: MenuItemUuid,
    ) -> Result<Variants, sqlx::Error> {
        let rows = query(GET_ITEM_VARIANTS_SQL)
            .bind(item.into_uuid())
            .fetch_all(&mut **tx)
            .await?;

        rows.iter()
            .map(|row| decode_variant(row).map(|(_, variant)| variant))
            .collect()
    }

    pub(crate) async fn create_item(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: NewCatalogItem,
        now: Timestamp,
    ) -> Result<CatalogItem, sqlx::Error> {
        let mut created = query_as::<Sqlite, CatalogItem>(CREATE_ITEM_SQL)
            .bind(item.uuid.into_uuid())
            .bind(item.name)
            .bind(item.description)
            .bind(item.category)
            .bind(decimal_value(item.base_price))
            .bind(item.available)
            .bind(timestamp_value(now))
            .bind(timestamp_value(now))
            .fetch_one(&mut **tx)
            .await?;

        for (position, variant) in (0_i64..).zip(&item.variants) {
            query(CREATE_VARIANT_SQL)
                .bind(item.uuid.into_uuid())
                .bind(&variant.size)
                .bind(decimal_value(variant.price_modifier))
                .bind(position)
                .execute(&mut **tx)
                .await?;
        }

        created.item.variants = item.variants;

        Ok(created)
    }

    pub(crate) async fn set_availability(
        &self,
        tx: &mut Transaction<'_, Sqlite>,
        item: MenuItemUuid,
        available: bool,
        now: Timestamp,
    ) -> Result<CatalogItem, sqlx::Error> {
        let mut updated = query_as::<Sqlite, CatalogItem>(SET_AVAILABILITY_SQL)
            .bind(available)
            .bind(timestamp_value(now))
            .bind(item.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        updated.item.variants = self.get_variants(tx, item).await?;

        Ok(updated)
    }
}

fn decode_variant(row: &SqliteRow) -> Result<(Uuid, Variant), sqlx::Error> {
    Ok((
        row.try_get("menu_item_uuid")?,
        Variant::new(
            row.try_get::<String, _>("size")?,
            try_get_decimal(row, "price_modifier")?,
        ),
    ))
}

impl<'r> FromRow<'r, SqliteRow> for CatalogItem {
    fn from_row(row: &'r SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: MenuItemUuid::from_uuid(row.try_get("uuid")?),
            description: row.try_get("description")?,
            category: row.try_get("category")?,
            item: MenuItem {
                name: row.try_get("name")?,
                base_price: try_get_decimal(row, "base_price")?,
                variants: Variants::new(),
                available: row.try_get("is_available")?,
            },
            created_at: try_get_timestamp(row, "created_at")?,
            updated_at: try_get_timestamp(row, "updated_at")?,
        })
    }
}
