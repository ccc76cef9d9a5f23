//! Storage abstractions for service layer
//!
//! Contains the file-backed map store used by the JSON shop repository.

pub mod json_map_store;
