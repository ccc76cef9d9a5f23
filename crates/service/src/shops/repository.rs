use async_trait::async_trait;
use models::{ObjectId, ShopRecord};

use crate::errors::ServiceError;
use crate::shops::domain::{CasOutcome, Versioned};

/// Document store for shop records.
///
/// Writes are compare-and-swap on the version handed out by `get`/`insert`:
/// an implementation must never overwrite a record whose stored version
/// differs from `expected_version`.
#[async_trait]
pub trait ShopRepository: Send + Sync {
    async fn insert(&self, shop: &ShopRecord) -> Result<Versioned<ShopRecord>, ServiceError>;
    async fn get(&self, id: &ObjectId) -> Result<Option<Versioned<ShopRecord>>, ServiceError>;
    async fn list(&self) -> Result<Vec<ShopRecord>, ServiceError>;
    async fn replace(&self, shop: &ShopRecord, expected_version: u64) -> Result<CasOutcome, ServiceError>;
    async fn delete(&self, id: &ObjectId, expected_version: u64) -> Result<CasOutcome, ServiceError>;
}

/// Process-local repository, used for tests and `storage.backend = "memory"`.
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryShopRepository {
        shops: RwLock<HashMap<ObjectId, Versioned<ShopRecord>>>,
    }

    impl InMemoryShopRepository {
        pub fn new() -> Self { Self::default() }
    }

    #[async_trait]
    impl ShopRepository for InMemoryShopRepository {
        async fn insert(&self, shop: &ShopRecord) -> Result<Versioned<ShopRecord>, ServiceError> {
            let mut shops = self.shops.write().await;
            if shops.contains_key(&shop.id) {
                return Err(ServiceError::Store(format!("duplicate shop id {}", shop.id)));
            }
            let stored = Versioned::new(1, shop.clone());
            shops.insert(shop.id.clone(), stored.clone());
            Ok(stored)
        }

        async fn get(&self, id: &ObjectId) -> Result<Option<Versioned<ShopRecord>>, ServiceError> {
            Ok(self.shops.read().await.get(id).cloned())
        }

        async fn list(&self) -> Result<Vec<ShopRecord>, ServiceError> {
            Ok(self.shops.read().await.values().map(|v| v.value.clone()).collect())
        }

        async fn replace(&self, shop: &ShopRecord, expected_version: u64) -> Result<CasOutcome, ServiceError> {
            let mut shops = self.shops.write().await;
            match shops.get_mut(&shop.id) {
                Some(current) if current.version == expected_version => {
                    current.version += 1;
                    current.value = shop.clone();
                    Ok(CasOutcome::Applied(current.version))
                }
                _ => Ok(CasOutcome::Stale),
            }
        }

        async fn delete(&self, id: &ObjectId, expected_version: u64) -> Result<CasOutcome, ServiceError> {
            let mut shops = self.shops.write().await;
            match shops.get(id) {
                Some(current) if current.version == expected_version => {
                    shops.remove(id);
                    Ok(CasOutcome::Applied(0))
                }
                _ => Ok(CasOutcome::Stale),
            }
        }
    }

}
