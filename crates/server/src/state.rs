use std::sync::Arc;

use service::access::AccessService;
use service::store::CollectionStore;

/// Shared handler state. Built once in `startup` and cloned per request.
#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<dyn CollectionStore>,
    pub access: Arc<AccessService>,
}

impl ServerState {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        let access = Arc::new(AccessService::new(Arc::clone(&store)));
        Self { store, access }
    }
}
