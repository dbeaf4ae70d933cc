//! Order Handlers

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod quote;
pub(crate) mod reorder;
pub(crate) mod staff_index;
pub(crate) mod status;
