use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use models::{ObjectId, ShopRecord};

use crate::errors::ServiceError;
use crate::shops::domain::{CasOutcome, Versioned};
use crate::shops::repository::ShopRepository;
use crate::storage::json_map_store::JsonMapStore;

/// All shops in a single JSON file, keyed by id.
pub struct JsonFileShopRepository {
    store: Arc<JsonMapStore<String, Versioned<ShopRecord>>>,
}

impl JsonFileShopRepository {
    /// Open (or create) the data file.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonMapStore::new(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl ShopRepository for JsonFileShopRepository {
    async fn insert(&self, shop: &ShopRecord) -> Result<Versioned<ShopRecord>, ServiceError> {
        let stored = Versioned::new(1, shop.clone());
        self.store
            .update_map(|map| {
                let key = shop.id.to_string();
                if map.contains_key(&key) {
                    return Err(ServiceError::Store(format!("duplicate shop id {}", shop.id)));
                }
                map.insert(key, stored.clone());
                Ok(())
            })
            .await?;
        Ok(stored)
    }

    async fn get(&self, id: &ObjectId) -> Result<Option<Versioned<ShopRecord>>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn list(&self) -> Result<Vec<ShopRecord>, ServiceError> {
        Ok(self.store.values().await.into_iter().map(|v| v.value).collect())
    }

    async fn replace(&self, shop: &ShopRecord, expected_version: u64) -> Result<CasOutcome, ServiceError> {
        self.store
            .update_map(|map| match map.get_mut(shop.id.as_str()) {
                Some(current) if current.version == expected_version => {
                    current.version += 1;
                    current.value = shop.clone();
                    Ok(CasOutcome::Applied(current.version))
                }
                _ => Ok(CasOutcome::Stale),
            })
            .await
    }

    async fn delete(&self, id: &ObjectId, expected_version: u64) -> Result<CasOutcome, ServiceError> {
        self.store
            .update_map(|map| match map.get(id.as_str()) {
                Some(current) if current.version == expected_version => {
                    map.remove(id.as_str());
                    Ok(CasOutcome::Applied(0))
                }
                _ => Ok(CasOutcome::Stale),
            })
            .await
    }
}
