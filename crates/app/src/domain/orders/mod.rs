//! Orders & Checkout

mod checkout;
pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use errors::OrdersServiceError;
pub use service::*;
