use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use caregate_core::{LoginOtpRequest, OtpRequestId, OtpStore, OtpStoreError};

/// In-memory challenge store. `take` removes under the write lock, so only
/// one caller can ever receive a given record.
#[derive(Clone, Default)]
pub struct HashMapOtpStore {
    requests: Arc<RwLock<HashMap<OtpRequestId, LoginOtpRequest>>>,
}

impl HashMapOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl OtpStore for HashMapOtpStore {
    async fn create(&self, request: LoginOtpRequest) -> Result<(), OtpStoreError> {
        let mut requests = self.requests.write().await;
        requests.insert(request.id, request);
        Ok(())
    }

    async fn take(&self, id: OtpRequestId) -> Result<Option<LoginOtpRequest>, OtpStoreError> {
        let mut requests = self.requests.write().await;
        Ok(requests.remove(&id))
    }
}
