use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// A stored value together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn new(version: u64, value: T) -> Self { Self { version, value } }
}

/// Result of a compare-and-swap write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasOutcome {
    /// Written; carries the new version (0 for deletes).
    Applied(u64),
    /// The stored version moved on (or the record vanished) since it was read.
    Stale,
}

/// Snapshot of the calling user, resolved by the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorProfile {
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
}

impl AuthorProfile {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), name: String::new(), avatar: String::new() }
    }
}

/// Ordering modes accepted by `ShopStore::list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// `averageReview` descending
    Highest,
    /// `averageReview` ascending
    Lowest,
    /// `totalReview` descending
    Most,
    /// `totalReview` ascending
    Least,
}

impl FromStr for SortKey {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "highest" => Ok(Self::Highest),
            // "loweset" is what older clients send
            "lowest" | "loweset" => Ok(Self::Lowest),
            "most" => Ok(Self::Most),
            "least" => Ok(Self::Least),
            other => Err(ServiceError::Validation(format!("unknown sort key `{other}`"))),
        }
    }
}
