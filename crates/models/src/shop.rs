//! Shop document shape as stored and returned to clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::object_id::ObjectId;

/// Identifier of an authenticated user, issued by the identity layer.
pub type UserId = String;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopRecord {
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub suburb: String,
    #[serde(default)]
    pub avatar: String,
    pub owner_user: UserId,
    /// Newest liker first; each user at most once.
    #[serde(default)]
    pub likes: Vec<UserId>,
    /// Newest comment first.
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub average_review: f64,
    #[serde(default)]
    pub total_review: u64,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: ObjectId,
    pub text: String,
    pub review: f64,
    pub author: UserId,
    /// Author display name at comment time.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub date: DateTime<Utc>,
}

/// Client-supplied fields for a new shop.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewShop {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub suburb: String,
    #[serde(default)]
    pub avatar: String,
}

pub fn validate_name(name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation("name must not be empty".into()));
    }
    Ok(())
}

impl ShopRecord {
    /// Fresh record owned by `owner`: no likes, no comments, zeroed aggregate.
    pub fn create(owner: &str, input: NewShop) -> Result<Self, ModelError> {
        validate_name(&input.name)?;
        if owner.trim().is_empty() {
            return Err(ModelError::Validation("owner must not be empty".into()));
        }
        Ok(Self {
            id: ObjectId::new(),
            name: input.name.trim().to_string(),
            text: input.text,
            address: input.address,
            suburb: input.suburb,
            avatar: input.avatar,
            owner_user: owner.to_string(),
            likes: Vec::new(),
            comments: Vec::new(),
            average_review: 0.0,
            total_review: 0,
            created_at: Utc::now(),
        })
    }
}
