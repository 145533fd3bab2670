use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use caregate_core::{AccountId, ProfileStore, ProfileStoreError, UserProfile};

#[derive(Clone, Default)]
pub struct HashMapProfileStore {
    profiles: Arc<RwLock<HashMap<AccountId, UserProfile>>>,
}

impl HashMapProfileStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProfileStore for HashMapProfileStore {
    async fn create(&self, profile: UserProfile) -> Result<(), ProfileStoreError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.id) {
            return Err(ProfileStoreError::ProfileAlreadyExists);
        }
        profiles.insert(profile.id, profile);
        Ok(())
    }

    async fn find_by_id(&self, id: AccountId) -> Result<Option<UserProfile>, ProfileStoreError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(&id).cloned())
    }
}
