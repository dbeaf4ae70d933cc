//! Extension traits

mod caller;
mod depot;
mod result;

pub(crate) use caller::CallerExt as _;
pub(crate) use depot::DepotExt as _;
pub(crate) use result::ResultExt as _;
