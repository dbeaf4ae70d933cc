//! Menu wire models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::catalog::models::CatalogItem;

/// Size option of a menu item.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub size: String,

    /// Added to the base price, as a decimal string
    pub price_modifier: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct MenuItemResponse {
    pub uuid: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,

    /// Price before any size modifier, as a decimal string
    pub base_price: String,

    pub variants: Vec<VariantResponse>,
    pub available: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CatalogItem> for MenuItemResponse {
    fn from(item: CatalogItem) -> Self {
        MenuItemResponse {
            uuid: item.uuid.into(),
            name: item.item.name,
            description: item.description,
            category: item.category,
            base_price: item.item.base_price.to_string(),
            variants: item
                .item
                .variants
                .into_iter()
                .map(|variant| VariantResponse {
                    size: variant.size,
                    price_modifier: variant.price_modifier.to_string(),
                })
                .collect(),
            available: item.item.available,
            created_at: item.created_at.to_string(),
            updated_at: item.updated_at.to_string(),
        }
    }
}
