//! Service layer for shops, likes and comments.
//! - Pure rules live in `shops::{like_set, comment_ledger, review_aggregator}`.
//! - `shops::ShopStore` runs load → mutate → recompute → compare-and-swap.
//! - Persistence sits behind `shops::repository::ShopRepository`.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod storage;
pub mod shops;
