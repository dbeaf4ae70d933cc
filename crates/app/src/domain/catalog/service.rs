//! Catalog service.

use std::collections::HashSet;

use async_trait::async_trait;
use brewline::pricing::MAX_UNIT_PRICE;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{CatalogItem, MenuItemUuid, NewCatalogItem},
        repository::SqliteCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCatalogService {
    db: Db,
    repository: SqliteCatalogRepository,
}

impl SqliteCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCatalogRepository::new(),
        }
    }
}

fn price_in_range(price: Decimal) -> bool {
    (Decimal::ZERO..=MAX_UNIT_PRICE).contains(&price)
}

fn validate(item: &NewCatalogItem) -> Result<(), CatalogServiceError> {
    if item.name.trim().is_empty() {
        return Err(CatalogServiceError::MissingRequiredData);
    }

    if !price_in_range(item.base_price) {
        return Err(CatalogServiceError::InvalidData);
    }

    let mut sizes = HashSet::new();

    for variant in &item.variants {
        if variant.size.is_empty() || !sizes.insert(variant.size.as_str()) {
            return Err(CatalogServiceError::InvalidData);
        }

        let sized = item.base_price.checked_add(variant.price_modifier);

        if !sized.is_some_and(price_in_range) {
            return Err(CatalogServiceError::InvalidData);
        }
    }

    Ok(())
}

#[async_trait]
impl CatalogService for SqliteCatalogService {
    async fn list_items(
        &self,
        include_unavailable: bool,
    ) -> Result<Vec<CatalogItem>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let items = self
            .repository
            .list_items(&mut tx, include_unavailable)
            .await?;

        tx.commit().await?;

        Ok(items)
    }

    async fn get_item(&self, item: MenuItemUuid) -> Result<CatalogItem, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let item = self.repository.get_item(&mut tx, item).await?;

        tx.commit().await?;

        Ok(item)
    }

    #[tracing::instrument(
        name = "catalog.service.create_item",
        skip(self, item),
        fields(menu_item_uuid = %item.uuid, name = %item.name),
        err
    )]
    async fn create_item(&self, item: NewCatalogItem) -> Result<CatalogItem, CatalogServiceError> {
        validate(&item)?;

        let mut tx = self.db.begin_write().await?;

        let created = self
            .repository
            .create_item(&mut tx, item, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    #[tracing::instrument(
        name = "catalog.service.set_availability",
        skip(self),
        fields(menu_item_uuid = %item, available),
        err
    )]
    async fn set_availability(
        &self,
        item: MenuItemUuid,
        available: bool,
    ) -> Result<CatalogItem, CatalogServiceError> {
        let mut tx = self.db.begin_write().await?;

        let updated = self
            .repository
            .set_availability(&mut tx, item, available, Timestamp::now())
            .await?;

        tx.commit().await?;

        info!("menu item availability changed");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List menu items, optionally including those switched off.
    async fn list_items(
        &self,
        include_unavailable: bool,
    ) -> Result<Vec<CatalogItem>, CatalogServiceError>;

    /// Retrieve a single menu item with its variants.
    async fn get_item(&self, item: MenuItemUuid) -> Result<CatalogItem, CatalogServiceError>;

    /// Create a menu item and its size variants.
    async fn create_item(&self, item: NewCatalogItem) -> Result<CatalogItem, CatalogServiceError>;

    /// Switch a menu item on or off.
    async fn set_availability(
        &self,
        item: MenuItemUuid,
        available: bool,
    ) -> Result<CatalogItem, CatalogServiceError>;
}
