//! Brewline
//!
//! Pricing, promo code and loyalty rules for a single coffee shop: everything
//! checkout needs to turn a cart into order totals, without any I/O.

pub mod catalog;
pub mod loyalty;
pub mod orders;
pub mod pricing;
pub mod promotions;
pub mod roles;
