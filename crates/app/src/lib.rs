//! Shared application domain and persistence modules.

pub mod context;
pub mod database;
pub mod domain;
pub mod settings;
pub mod uuids;

mod columns;

#[cfg(test)]
mod test;
