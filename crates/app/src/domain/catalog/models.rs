//! Catalog Models

use brewline::catalog::{MenuItem, Variants};
use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<CatalogItem>;

/// Menu item as stored, wrapping the pricing view used at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub uuid: MenuItemUuid,
    pub description: String,
    pub category: String,
    pub item: MenuItem,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Menu Item Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCatalogItem {
    pub uuid: MenuItemUuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub base_price: Decimal,
    pub variants: Variants,
    pub available: bool,
}
