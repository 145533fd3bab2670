use serde::{Deserialize, Serialize};

use crate::domain::account::AccountId;

/// 1:1 companion of an `Account`, created together with it on registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,
}

impl UserProfile {
    pub fn new(id: AccountId, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}
