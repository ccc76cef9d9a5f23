use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use models::shop_document::{self, Column, Entity};
use models::{ObjectId, ShopRecord};

use crate::errors::ServiceError;
use crate::shops::domain::{CasOutcome, Versioned};
use crate::shops::repository::ShopRepository;

/// Postgres-backed repository: one `shop` row per record, document in jsonb.
pub struct SeaOrmShopRepository {
    pub db: DatabaseConnection,
}

fn version_of(v: i64) -> Result<u64, ServiceError> {
    u64::try_from(v).map_err(|_| ServiceError::Store(format!("negative version {v}")))
}

fn db_version(v: u64) -> Result<i64, ServiceError> {
    i64::try_from(v).map_err(|_| ServiceError::Store(format!("version {v} out of range")))
}

#[async_trait]
impl ShopRepository for SeaOrmShopRepository {
    async fn insert(&self, shop: &ShopRecord) -> Result<Versioned<ShopRecord>, ServiceError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let am = shop_document::ActiveModel {
            id: Set(shop.id.to_string()),
            document: Set(shop_document::encode(shop)?),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(&self.db).await.map_err(ServiceError::store)?;
        Ok(Versioned::new(1, shop.clone()))
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Versioned<ShopRecord>>, ServiceError> {
        let found = Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(ServiceError::store)?;
        match found {
            Some(row) => Ok(Some(Versioned::new(version_of(row.version)?, row.decode()?))),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<ShopRecord>, ServiceError> {
        let rows = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(ServiceError::store)?;
        rows.iter().map(|r| r.decode().map_err(ServiceError::from)).collect()
    }

    async fn replace(&self, shop: &ShopRecord, expected_version: u64) -> Result<CasOutcome, ServiceError> {
        let expected = db_version(expected_version)?;
        let res = Entity::update_many()
            .col_expr(Column::Document, Expr::value(shop_document::encode(shop)?))
            .col_expr(Column::Version, Expr::value(expected + 1))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(shop.id.to_string()))
            .filter(Column::Version.eq(expected))
            .exec(&self.db)
            .await
            .map_err(ServiceError::store)?;
        Ok(if res.rows_affected == 1 { CasOutcome::Applied(expected_version + 1) } else { CasOutcome::Stale })
    }

    async fn delete(&self, id: &ObjectId, expected_version: u64) -> Result<CasOutcome, ServiceError> {
        let res = Entity::delete_many()
            .filter(Column::Id.eq(id.to_string()))
            .filter(Column::Version.eq(db_version(expected_version)?))
            .exec(&self.db)
            .await
            .map_err(ServiceError::store)?;
        Ok(if res.rows_affected == 1 { CasOutcome::Applied(0) } else { CasOutcome::Stale })
    }
}
