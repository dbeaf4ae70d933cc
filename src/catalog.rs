//! Catalog

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

/// A purchasable size option of a menu item with its price adjustment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Size label, matched exactly against cart lines.
    pub size: String,

    /// Amount added to the base price (may be negative).
    pub price_modifier: Decimal,
}

impl Variant {
    /// Create a new variant.
    pub fn new(size: impl Into<String>, price_modifier: Decimal) -> Self {
        Self {
            size: size.into(),
            price_modifier,
        }
    }
}

/// Variants of a single menu item.
pub type Variants = SmallVec<[Variant; 3]>;

/// Pricing view of a menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Display name.
    pub name: String,

    /// Price before any variant modifier.
    pub base_price: Decimal,

    /// Size variants.
    pub variants: Variants,

    /// Whether the item can currently be ordered.
    pub available: bool,
}

/// Raised when a strict price lookup cannot match the requested size.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{item} has no \"{size}\" variant")]
pub struct UnknownSize {
    /// Item name.
    pub item: String,

    /// Requested size.
    pub size: String,
}

impl MenuItem {
    /// Find the variant with exactly this size.
    pub fn variant(&self, size: &str) -> Option<&Variant> {
        self.variants.iter().find(|variant| variant.size == size)
    }

    /// Unit price for a size.
    ///
    /// A size without a matching variant is charged at the base price.
    pub fn unit_price(&self, size: &str) -> Decimal {
        self.variant(size)
            .map_or(self.base_price, |variant| {
                self.base_price + variant.price_modifier
            })
    }

    /// Unit price for a size, rejecting sizes the item does not offer.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSize`] when no variant matches `size`.
    pub fn strict_unit_price(&self, size: &str) -> Result<Decimal, UnknownSize> {
        self.variant(size)
            .map(|variant| self.base_price + variant.price_modifier)
            .ok_or_else(|| UnknownSize {
                item: self.name.clone(),
                size: size.to_string(),
            })
    }
}
