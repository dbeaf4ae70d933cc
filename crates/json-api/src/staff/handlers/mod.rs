//! Staff Account Handlers

pub(crate) mod index;
pub(crate) mod role;
