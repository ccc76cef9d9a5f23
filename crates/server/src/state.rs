use std::sync::Arc;

use service::shops::repository::ShopRepository;
use service::shops::ShopStore;

/// Shared handler state.
#[derive(Clone)]
pub struct ServerState {
    pub shops: Arc<ShopStore<dyn ShopRepository>>,
}

impl ServerState {
    pub fn new(shops: ShopStore<dyn ShopRepository>) -> Self {
        Self { shops: Arc::new(shops) }
    }
}
