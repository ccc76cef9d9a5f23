//! Shared plumbing for the shop review binaries: logging bootstrap,
//! runtime directory checks and small transport types.

pub mod types;
pub mod utils;
pub mod env;
