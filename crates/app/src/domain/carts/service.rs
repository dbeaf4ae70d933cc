//! Carts service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartLine, CartLineUuid, NewCartLine},
            repository::SqliteCartsRepository,
        },
        catalog::repository::SqliteCatalogRepository,
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct SqliteCartsService {
    db: Db,
    repository: SqliteCartsRepository,
    catalog: SqliteCatalogRepository,
}

impl SqliteCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: SqliteCartsRepository::new(),
            catalog: SqliteCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for SqliteCartsService {
    async fn list_lines(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let lines = self.repository.list_lines(&mut tx, user).await?;

        tx.commit().await?;

        Ok(lines)
    }

    #[tracing::instrument(
        name = "carts.service.add_line",
        skip(self, line),
        fields(user_uuid = %user, menu_item_uuid = %line.menu_item, quantity = line.quantity),
        err
    )]
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLine, CartsServiceError> {
        if line.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        if line.size.trim().is_empty() {
            return Err(CartsServiceError::MissingRequiredData);
        }

        let mut tx = self.db.begin_write().await?;

        let item = self
            .catalog
            .find_item(&mut tx, line.menu_item)
            .await?
            .ok_or(CartsServiceError::InvalidReference)?;

        if !item.item.available {
            return Err(CartsServiceError::ItemUnavailable);
        }

        let merged = self
            .repository
            .upsert_line(&mut tx, user, line, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(merged)
    }

    #[tracing::instrument(
        name = "carts.service.update_quantity",
        skip(self),
        fields(user_uuid = %user, cart_line_uuid = %line, quantity),
        err
    )]
    async fn update_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: i64,
    ) -> Result<Option<CartLine>, CartsServiceError> {
        if quantity <= 0 {
            self.remove_line(user, line).await?;

            return Ok(None);
        }

        let quantity = u32::try_from(quantity).map_err(|_| CartsServiceError::InvalidQuantity)?;

        let mut tx = self.db.begin_write().await?;

        let updated = self
            .repository
            .set_quantity(&mut tx, user, line, quantity, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(Some(updated))
    }

    #[tracing::instrument(
        name = "carts.service.remove_line",
        skip(self),
        fields(user_uuid = %user, cart_line_uuid = %line),
        err
    )]
    async fn remove_line(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin_write().await?;

        let rows_affected = self.repository.delete_line(&mut tx, user, line).await?;

        if rows_affected == 0 {
            return Err(CartsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    #[tracing::instrument(name = "carts.service.clear", skip(self), fields(user_uuid = %user), err)]
    async fn clear(&self, user: UserUuid) -> Result<u64, CartsServiceError> {
        let mut tx = self.db.begin_write().await?;

        let removed = self.repository.clear(&mut tx, user).await?;

        tx.commit().await?;

        Ok(removed)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Lines in the user's cart, oldest first.
    async fn list_lines(&self, user: UserUuid) -> Result<Vec<CartLine>, CartsServiceError>;

    /// Add an available menu item to the cart. Adding an item and size already
    /// in the cart increases that line's quantity.
    async fn add_line(&self, user: UserUuid, line: NewCartLine)
    -> Result<CartLine, CartsServiceError>;

    /// Set a line's quantity. Zero or less removes the line and returns `None`.
    async fn update_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        quantity: i64,
    ) -> Result<Option<CartLine>, CartsServiceError>;

    /// Remove one line.
    async fn remove_line(&self, user: UserUuid, line: CartLineUuid) -> Result<(), CartsServiceError>;

    /// Empty the cart, returning the number of lines removed.
    async fn clear(&self, user: UserUuid) -> Result<u64, CartsServiceError>;
}
