//! CLI command implementations.

pub(crate) mod estimate;
pub(crate) mod info;
pub(crate) mod list;
pub(crate) mod simulate;
