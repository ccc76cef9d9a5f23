//! Shop records: likes, comments and the derived review aggregate.
//!
//! Layers, leaf first: pure rules (`like_set`, `comment_ledger`,
//! `review_aggregator`), the persistence seam (`repository`, `repo`), and the
//! orchestrating [`ShopStore`].

pub mod domain;
pub mod like_set;
pub mod comment_ledger;
pub mod review_aggregator;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::{ShopStore, StoreConfig};
