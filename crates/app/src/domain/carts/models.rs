//! Cart Models

use jiff::Timestamp;

use crate::{
    domain::{catalog::models::MenuItemUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLine>;

/// One menu item and size in a customer's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub uuid: CartLineUuid,
    pub user: UserUuid,
    pub menu_item: MenuItemUuid,
    pub size: String,
    pub quantity: u32,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Line Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartLine {
    pub menu_item: MenuItemUuid,
    pub size: String,
    pub quantity: u32,
    pub notes: Option<String>,
}
