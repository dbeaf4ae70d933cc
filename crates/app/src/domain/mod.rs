//! Brewline Domain Concerns

pub mod carts;
pub mod catalog;
pub mod loyalty;
pub mod orders;
pub mod promotions;
pub mod reviews;
pub mod users;
