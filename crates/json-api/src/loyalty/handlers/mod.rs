//! Loyalty Handlers

pub(crate) mod balance;
pub(crate) mod bonus;
pub(crate) mod transactions;
