//! `shop` table: one JSON document per shop plus a version column used for
//! compare-and-swap writes.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::shop::ShopRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "shop")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub document: Json,
    pub version: i64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn decode(&self) -> Result<ShopRecord, ModelError> {
        serde_json::from_value(self.document.clone()).map_err(|e| ModelError::Decode(format!("shop {}: {e}", self.id)))
    }
}

pub fn encode(shop: &ShopRecord) -> Result<Json, ModelError> {
    serde_json::to_value(shop).map_err(|e| ModelError::Decode(e.to_string()))
}
