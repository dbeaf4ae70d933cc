//! Menu Handlers

pub(crate) mod availability;
pub(crate) mod create;
pub(crate) mod index;
