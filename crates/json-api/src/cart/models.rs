//! Cart wire models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use brewline_app::domain::carts::models::CartLine;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartLineResponse {
    pub uuid: Uuid,
    pub menu_item_uuid: Uuid,
    pub size: String,
    pub quantity: u32,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        CartLineResponse {
            uuid: line.uuid.into(),
            menu_item_uuid: line.menu_item.into(),
            size: line.size,
            quantity: line.quantity,
            notes: line.notes,
            created_at: line.created_at.to_string(),
            updated_at: line.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    pub lines: Vec<CartLineResponse>,
}
