//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        carts::{CartsService, SqliteCartsService},
        catalog::{CatalogService, SqliteCatalogService},
        loyalty::{LoyaltyService, SqliteLoyaltyService},
        orders::{OrdersService, SqliteOrdersService},
        promotions::{PromotionsService, SqlitePromotionsService},
        reviews::{ReviewsService, SqliteReviewsService},
        users::{SqliteUsersService, UsersService},
    },
    settings::CheckoutSettings,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub promotions: Arc<dyn PromotionsService>,
    pub loyalty: Arc<dyn LoyaltyService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
}

impl AppContext {
    /// Build application context from a database URL, applying any pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection or migrating
    /// it fails.
    pub async fn from_database_url(
        url: &str,
        settings: CheckoutSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        Ok(Self::from_db(Db::new(pool), settings))
    }

    #[must_use]
    pub fn from_db(db: Db, settings: CheckoutSettings) -> Self {
        Self {
            users: Arc::new(SqliteUsersService::new(db.clone())),
            catalog: Arc::new(SqliteCatalogService::new(db.clone())),
            carts: Arc::new(SqliteCartsService::new(db.clone())),
            promotions: Arc::new(SqlitePromotionsService::new(db.clone())),
            loyalty: Arc::new(SqliteLoyaltyService::new(db.clone())),
            orders: Arc::new(SqliteOrdersService::new(db.clone(), settings)),
            reviews: Arc::new(SqliteReviewsService::new(db)),
        }
    }
}
