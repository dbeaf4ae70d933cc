//! Promo Code Handlers

pub(crate) mod preview;
